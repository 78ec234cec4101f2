use super::anything::Anything;
use serde::{Serialize, Serializer};

/// Scalar-or-sequence value for attributes that accept either one value for
/// every point or one value per point (`arrayOk`). Both forms encode under the
/// same key.
#[derive(Debug, Clone, PartialEq)]
pub enum Data<T> {
    Constant(T),
    Variable(Vec<T>),
}

impl<T: Default> Default for Data<T> {
    fn default() -> Self {
        Self::Constant(T::default())
    }
}

impl<T> From<T> for Data<T> {
    fn from(value: T) -> Self {
        Self::Constant(value)
    }
}

impl<T> From<Vec<T>> for Data<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Variable(values)
    }
}

impl<T, const N: usize> From<[T; N]> for Data<T> {
    fn from(values: [T; N]) -> Self {
        Self::Variable(Vec::from(values))
    }
}

impl From<&str> for Data<String> {
    fn from(value: &str) -> Self {
        Self::Constant(value.to_string())
    }
}

impl<T: Serialize> Serialize for Data<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Constant(value) => value.serialize(serializer),
            Self::Variable(values) => serializer.collect_seq(values),
        }
    }
}

/// A per-point data column (`valType: "data_array"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataArray(pub Vec<Anything>);

impl<T: Into<Anything>> From<Vec<T>> for DataArray {
    fn from(values: Vec<T>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Anything>, const N: usize> From<[T; N]> for DataArray {
    fn from(values: [T; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl Serialize for DataArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.0)
    }
}

/// Encodes Plotly numbers the way JavaScript prints them: whole values carry
/// no fractional part (`5`, not `5.0`).
pub struct Numeric<'a, T: ?Sized>(pub &'a T);

/// Integers beyond this magnitude are not exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Numeric<'_, f64> {
    #[expect(clippy::cast_possible_truncation)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value: f64 = *self.0;
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl Serialize for Numeric<'_, Vec<f64>> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter().map(Numeric))
    }
}

impl Serialize for Numeric<'_, Data<f64>> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Data::Constant(value) => Numeric(value).serialize(serializer),
            Data::Variable(values) => Numeric(values).serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn constant_encodes_as_bare_value() {
        let data: Data<String> = Data::from("lines");
        let actual: Value = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json!("lines"), actual);
    }

    #[test]
    fn variable_encodes_as_array() {
        let data: Data<String> = Data::from(vec!["a".to_string(), "b".to_string()]);
        let actual: Value = serde_json::to_value(&data).expect("serialize");
        assert_eq!(json!(["a", "b"]), actual);
    }

    #[test]
    fn whole_numbers_drop_the_fraction() {
        let actual: String = serde_json::to_string(&Numeric(&5.0)).expect("serialize");
        assert_eq!("5", actual);
        let actual: String = serde_json::to_string(&Numeric(&0.25)).expect("serialize");
        assert_eq!("0.25", actual);
    }

    #[test]
    fn numeric_data_keeps_scalar_or_sequence_shape() {
        let constant: Data<f64> = Data::from(5.0);
        let variable: Data<f64> = Data::from([1.0, 2.0, 3.0]);
        assert_eq!(
            "5",
            serde_json::to_string(&Numeric(&constant)).expect("serialize")
        );
        assert_eq!(
            "[1,2,3]",
            serde_json::to_string(&Numeric(&variable)).expect("serialize")
        );
    }

    #[test]
    fn data_array_from_mixed_sources() {
        let column: DataArray = DataArray::from([1, 2, 3]);
        let actual: Value = serde_json::to_value(&column).expect("serialize");
        assert_eq!(json!([1, 2, 3]), actual);
        let labels: DataArray = DataArray::from(vec!["a", "b"]);
        let actual: Value = serde_json::to_value(&labels).expect("serialize");
        assert_eq!(json!(["a", "b"]), actual);
    }

    #[test]
    fn default_is_constant_default() {
        let data: Data<f64> = Data::default();
        assert_eq!(Data::Constant(0.0), data);
    }
}
