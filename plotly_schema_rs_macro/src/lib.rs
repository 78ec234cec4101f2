//! Procedural macro that expands a Plotly schema into Rust types at compile time.
//!
//! ## Example
//!
//! ```ignore
//! plotly_schema_rs_macro::plotly_schema_to_rust!(r#"{ "r": { "valType": "number", "arrayOk": true } }"#);
//!
//! let root: Root = Root::new(vec![1.0, 2.0, 3.0]);
//! ```
//!
//! The expansion refers to `::plotly_schema_rs::runtime`, so the calling crate
//! must depend on `plotly-schema-rs` as well.

use std::path::PathBuf;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote_spanned;
use syn::parse::{Parse, ParseStream};
use syn::{LitStr, Token, parse_macro_input};

use plotly_schema_rs::{GenerateSettings, generate_to_string};

mod kw {
    syn::custom_keyword!(path);
    syn::custom_keyword!(root);
    syn::custom_keyword!(runtime);
}

/// Where the schema comes from.
enum SchemaSource {
    Inline(LitStr),
    /// Relative to the calling crate's `CARGO_MANIFEST_DIR`.
    File(LitStr),
}

struct MacroInput {
    source: SchemaSource,
    root: Option<LitStr>,
    runtime: Option<LitStr>,
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            let json: LitStr = input.parse()?;
            let mut parsed: Self = Self {
                source: SchemaSource::Inline(json),
                root: None,
                runtime: None,
            };
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
                parsed.parse_options(input)?;
            }
            return Ok(parsed);
        }

        input.parse::<kw::path>()?;
        input.parse::<Token![=]>()?;
        let path: LitStr = input.parse()?;
        let mut parsed: Self = Self {
            source: SchemaSource::File(path),
            root: None,
            runtime: None,
        };
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            parsed.parse_options(input)?;
        }
        Ok(parsed)
    }
}

impl MacroInput {
    /// `root = "Name"` and `runtime = "path"`, comma separated, trailing comma allowed.
    fn parse_options(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::root) {
                input.parse::<kw::root>()?;
                input.parse::<Token![=]>()?;
                self.root = Some(input.parse()?);
            } else if lookahead.peek(kw::runtime) {
                input.parse::<kw::runtime>()?;
                input.parse::<Token![=]>()?;
                self.runtime = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(())
    }

    fn schema_json(&self) -> syn::Result<String> {
        match &self.source {
            SchemaSource::Inline(json) => Ok(json.value()),
            SchemaSource::File(path) => {
                let manifest_dir: String = std::env::var("CARGO_MANIFEST_DIR").map_err(|e| {
                    syn::Error::new(path.span(), format!("CARGO_MANIFEST_DIR is not set: {e}"))
                })?;
                let full_path: PathBuf = PathBuf::from(manifest_dir).join(path.value());
                std::fs::read_to_string(&full_path).map_err(|e| {
                    syn::Error::new(
                        path.span(),
                        format!("failed to read {}: {e}", full_path.display()),
                    )
                })
            }
        }
    }

    fn span(&self) -> Span {
        match &self.source {
            SchemaSource::Inline(lit) | SchemaSource::File(lit) => lit.span(),
        }
    }

    fn settings(&self) -> GenerateSettings {
        let mut settings: GenerateSettings = GenerateSettings::default();
        if let Some(root) = &self.root {
            settings.root_name = root.value();
        }
        if let Some(runtime) = &self.runtime {
            settings.runtime_path = runtime.value();
        }
        settings
    }
}

/// Expand a Plotly schema into Rust types.
///
/// ```ignore
/// plotly_schema_to_rust!(r#"{ ... }"#);
/// plotly_schema_to_rust!(r#"{ ... }"#, root = "Marker");
/// plotly_schema_to_rust!(path = "fixtures/plot-schema.json");
/// plotly_schema_to_rust!(path = "fixtures/attrs.json", root = "Figure", runtime = "crate::rt");
/// ```
///
/// Generation errors are reported as `compile_error!` at the schema argument.
#[proc_macro]
pub fn plotly_schema_to_rust(input: TokenStream) -> TokenStream {
    let input: MacroInput = parse_macro_input!(input as MacroInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => {
            let message: String = e.to_string();
            let span: Span = e.span();
            quote_spanned!(span=> ::core::compile_error!(#message);).into()
        }
    }
}

fn expand(input: &MacroInput) -> syn::Result<proc_macro2::TokenStream> {
    let schema_json: String = input.schema_json()?;
    let code: String = generate_to_string(&schema_json, &input.settings())
        .map_err(|e| syn::Error::new(input.span(), format!("plotly schema generation failed: {e}")))?;
    code.parse::<proc_macro2::TokenStream>().map_err(|e| {
        syn::Error::new(input.span(), format!("generated code does not tokenize: {e}"))
    })
}
