//! Example matching the README: one trace, a transform, layout and frames.
//! See [README Examples](../README.md#examples).
//!
//! Contains only the input schema and the conversion logic; generated Rust is
//! written to stdout.

use std::io;

const SCHEMA_JSON: &str = r#"{
  "traces": {
    "scatter": {
      "type": "scatter",
      "animatable": true,
      "attributes": {
        "type": "scatter",
        "visible": { "valType": "enumerated", "values": [true, false, "legendonly"], "dflt": true },
        "name": { "valType": "string", "description": "Sets the trace name." },
        "x": { "valType": "data_array" },
        "y": { "valType": "data_array" },
        "mode": { "valType": "flaglist", "flags": ["lines", "markers", "text"], "extras": ["none"] },
        "xaxis": { "valType": "subplotid", "dflt": "x", "regex": "/^x([2-9]|[1-9][0-9]+)?( domain)?$/" },
        "marker": {
          "size": { "valType": "number", "min": 0, "dflt": 6, "arrayOk": true },
          "color": { "valType": "color", "arrayOk": true },
          "role": "object"
        }
      }
    }
  },
  "transforms": {
    "filter": {
      "attributes": {
        "target": { "valType": "string" },
        "operation": { "valType": "enumerated", "values": ["=", "!=", "<", ">"], "dflt": "=" }
      }
    }
  },
  "layout": {
    "layoutAttributes": {
      "title": { "text": { "valType": "string" }, "role": "object" },
      "showlegend": { "valType": "boolean" }
    }
  },
  "frames": {
    "items": {
      "frames_entry": {
        "name": { "valType": "string" },
        "data": { "valType": "any" },
        "layout": { "valType": "any" },
        "role": "object"
      }
    },
    "role": "object"
  }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout: io::Stdout = io::stdout();
    let settings = plotly_schema_rs::GenerateSettings::default();
    plotly_schema_rs::generate_to_writer(SCHEMA_JSON, &mut stdout, &settings)?;
    Ok(())
}
