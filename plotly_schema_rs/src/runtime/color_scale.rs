use super::data::Numeric;
use serde::{Serialize, Serializer};

/// A colorscale: either a named palette (`"Viridis"`) or explicit
/// `[stop, color]` pairs with stops in `0..=1`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    Named(String),
    Stops(Vec<(f64, String)>),
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::Stops(Vec::new())
    }
}

impl From<&str> for ColorScale {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ColorScale {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl<S: Into<String>> From<Vec<(f64, S)>> for ColorScale {
    fn from(stops: Vec<(f64, S)>) -> Self {
        Self::Stops(
            stops
                .into_iter()
                .map(|(stop, color)| (stop, color.into()))
                .collect(),
        )
    }
}

impl Serialize for ColorScale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Stops(stops) => {
                serializer.collect_seq(stops.iter().map(|(stop, color)| (Numeric(stop), color)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn named_scale_is_a_string() {
        let actual: Value = serde_json::to_value(ColorScale::from("Viridis")).expect("serialize");
        assert_eq!(json!("Viridis"), actual);
    }

    #[test]
    fn stops_are_pairs() {
        let scale: ColorScale = ColorScale::from(vec![(0.0, "white"), (0.5, "gray"), (1.0, "black")]);
        let actual: String = serde_json::to_string(&scale).expect("serialize");
        assert_eq!(r#"[[0,"white"],[0.5,"gray"],[1,"black"]]"#, actual);
    }
}
