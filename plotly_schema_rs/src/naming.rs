//! Identifier synthesis from Plotly wire keys.
//!
//! Plotly spells most keys as concatenated lowercase words (`autocolorscale`,
//! `hoverlabel`). Keys are split into words with a vocabulary-driven
//! segmentation, then cased with heck.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Longest vocabulary entry considered during segmentation.
const MAX_WORD_LEN: usize = 16;

/// Words that appear in Plotly attribute and trace names.
const VOCABULARY: &[&str] = &[
    "align", "alignment", "all", "alpha", "amount", "anchor", "angle", "angular", "annotation",
    "annotations", "area", "array", "arrow", "ascent", "aspect", "auto", "axes", "axis",
    "background", "bar", "bars", "base", "bin", "bins", "blend", "border", "bottom", "bounds",
    "box", "boxes", "button", "buttons", "by", "calendar", "candlestick", "caps", "carpet",
    "cast", "category", "cell", "cells", "center", "choropleth", "class", "click", "clip",
    "close", "cluster", "coastline", "color", "coloring", "colors", "column", "columns",
    "cone", "connect", "connector", "constrain", "constraint", "contour", "contours", "count",
    "cross", "cumulative", "current", "custom", "dash", "data", "decreasing", "default",
    "delta", "density", "depth", "diagonal", "dimension", "dimensions", "direction", "display",
    "distance", "divider", "domain", "dot", "drag", "duration", "easing", "edge", "edit",
    "editable", "enabled", "end", "error", "exponent", "extend", "eye", "face", "family",
    "fill", "filter", "first", "fixed", "flat", "font", "format", "fraction", "frame",
    "frames", "from", "func", "funnel", "gap", "gaps", "gauge", "geo", "grid", "group",
    "groups", "half", "hatch", "head", "header", "heatmap", "height", "hide", "high", "hist",
    "histogram", "hole", "horizontal", "hover", "icicle", "ids", "image", "in", "increasing",
    "indicator", "info", "inside", "intensity", "interval", "isosurface", "item", "jitter",
    "join", "key", "label", "labels", "lake", "land", "lat", "latitude", "layer", "layout",
    "leaf", "left", "legend", "len", "length", "level", "light", "lighting", "line", "lines",
    "link", "links", "list", "location", "locations", "lon", "longitude", "low", "map",
    "mapbox", "margin", "mark", "marker", "markers", "max", "mean", "menu", "menus", "mesh",
    "meta", "method", "mid", "middle", "min", "minor", "mirror", "mode", "name", "names",
    "next", "node", "norm", "notch", "number", "ocean", "off", "offset", "ohlc", "on", "only",
    "opacity", "open", "operation", "order", "orientation", "origin", "outlier", "outliers",
    "outside", "pad", "padding", "paper", "parallel", "parcats", "parcoords", "parent",
    "parents", "path", "pattern", "per", "period", "pie", "plot", "point", "points", "polar",
    "pos", "position", "prefix", "projection", "pull", "radial", "range", "rank", "ratio",
    "ref", "reference", "relative", "revision", "right", "river", "root", "rotate", "rotation",
    "row", "rows", "sankey", "scale", "scatter", "scene", "select", "selected", "selection",
    "separator", "separators", "series", "shape", "shapes", "show", "side", "simplify", "size",
    "sizes", "slider", "sliders", "smith", "smoothing", "snap", "sort", "source", "space",
    "spacing", "span", "spike", "splom", "src", "stack", "standoff", "start", "step", "steps",
    "stop", "stops", "streamtube", "stroke", "style", "subplot", "suffix", "sunburst",
    "surface", "suspected", "symbol", "table", "tail", "target", "template", "ternary", "text",
    "texture", "theta", "thickness", "tick", "ticks", "tile", "title", "to", "top", "trace",
    "traces", "transform", "transforms", "transition", "treemap", "type", "uniform",
    "unselected", "update", "vals", "value", "values", "variant", "vertical", "violin",
    "visible", "volume", "waterfall", "way", "weight", "whisker", "width", "window", "word",
    "wrap", "zero", "zoom",
];

/// Abbreviations kept whole so that e.g. `scatter3d` is `scatter` + `3d`.
const ABBREVIATIONS: &[&str] = &[
    "2d", "3d", "bg", "gl", "id", "rgb", "ui", "uid", "dx", "dy", "dz", "x", "y", "z",
];

/// Single-letter axis tokens; these only match at the start or end of a key.
const AXIS_LETTERS: &[&str] = &["x", "y", "z"];

static WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    VOCABULARY
        .iter()
        .chain(ABBREVIATIONS.iter())
        .copied()
        .collect()
});

/// Rust keywords (strict and reserved, edition 2024). Snake-case field names
/// that collide are emitted as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Count prefix (`nbinsx`, `nticks`); only matches at the start of a key.
const COUNT_PREFIX: &str = "n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Word,
    Digit,
}

/// Split a wire key into lowercase words.
///
/// Camel-cased chunks (`editType`) are split on case boundaries. A lowercase
/// chunk is split only when it is covered entirely by vocabulary words, taking
/// the cover with the fewest words; any other chunk stays one word.
#[must_use]
pub fn segment(wire: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for chunk in wire
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
    {
        if chunk.chars().any(|c| c.is_ascii_uppercase()) {
            words.extend(
                chunk
                    .to_snake_case()
                    .split('_')
                    .filter(|word| !word.is_empty())
                    .map(String::from),
            );
        } else {
            words.extend(segment_lowercase(chunk));
        }
    }
    words
}

fn is_vocabulary_piece(chunk: &str, start: usize, end: usize) -> bool {
    let piece: &str = &chunk[start..end];
    if piece == COUNT_PREFIX {
        return start == 0 && end < chunk.len();
    }
    if !WORDS.contains(piece) {
        return false;
    }
    if AXIS_LETTERS.contains(&piece) {
        let at_start: bool = start == 0;
        let at_end: bool = chunk[end..].chars().all(|c| c.is_ascii_digit());
        return at_start || at_end;
    }
    true
}

fn segment_lowercase(chunk: &str) -> Vec<String> {
    let len: usize = chunk.len();
    // best[i] = fewest words covering chunk[..i]
    let mut best: Vec<Option<usize>> = vec![None; len + 1];
    let mut step: Vec<(usize, Piece)> = vec![(0, Piece::Word); len + 1];
    best[0] = Some(0);

    for end in 1..=len {
        for start in end.saturating_sub(MAX_WORD_LEN)..end {
            let Some(tokens) = best[start] else {
                continue;
            };
            let candidate: Option<(usize, Piece)> = if is_vocabulary_piece(chunk, start, end) {
                Some((tokens + 1, Piece::Word))
            } else if end - start == 1 && chunk.as_bytes()[start].is_ascii_digit() {
                Some((tokens, Piece::Digit))
            } else {
                None
            };
            let Some((cost, piece)) = candidate else {
                continue;
            };
            if best[end].is_none_or(|current| cost < current) {
                best[end] = Some(cost);
                step[end] = (start, piece);
            }
        }
    }

    if best[len].is_none() {
        return vec![chunk.to_string()];
    }

    let mut pieces: Vec<(&str, Piece)> = Vec::new();
    let mut end: usize = len;
    while end > 0 {
        let (start, piece) = step[end];
        pieces.push((&chunk[start..end], piece));
        end = start;
    }
    pieces.reverse();

    let mut words: Vec<String> = Vec::new();
    for (text, piece) in pieces {
        match (piece, words.last_mut()) {
            (Piece::Digit, Some(last)) => last.push_str(text),
            _ => words.push(text.to_string()),
        }
    }
    words
}

/// Snake-case field name for a wire key, escaped when it is a keyword.
#[must_use]
pub fn to_field_name(wire: &str) -> String {
    let words: Vec<String> = segment(wire);
    let mut name: String = words.join("_");
    if name.is_empty() {
        name = "field".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name = format!("_{name}");
    }
    escape_keyword(name)
}

/// Upper-camel type name for a wire key.
#[must_use]
pub fn to_type_name(wire: &str) -> String {
    let name: String = segment(wire).join("_").to_upper_camel_case();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{name}")
    } else {
        name
    }
}

/// Nested type name: the parent's type name followed by the child's.
#[must_use]
pub fn nested_type_name(parent: &str, child_wire: &str) -> String {
    format!("{parent}{}", to_type_name(child_wire))
}

/// Element name for a collection: `annotations` holds `annotation`s.
#[must_use]
pub fn singular(wire: &str) -> String {
    match wire.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => wire.to_string(),
    }
}

/// Constant name for one flag of a flag list.
#[must_use]
pub fn to_flag_constant(flag: &str) -> String {
    let name: String = segment(flag).join("_").to_shouty_snake_case();
    if name.is_empty() {
        "EMPTY".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{name}")
    } else {
        name
    }
}

fn symbol_word(c: char) -> String {
    let word: &str = match c {
        '=' => "Equal",
        '!' => "Not",
        '<' => "Less",
        '>' => "Greater",
        '[' => "OpenBracket",
        ']' => "CloseBracket",
        '(' => "OpenParen",
        ')' => "CloseParen",
        '{' => "OpenBrace",
        '}' => "CloseBrace",
        '+' => "Plus",
        '-' => "Minus",
        '*' => "Star",
        '/' => "Slash",
        '%' => "Percent",
        '.' => "Dot",
        '#' => "Hash",
        '&' => "And",
        '|' => "Or",
        '^' => "Caret",
        '~' => "Tilde",
        '?' => "Question",
        ':' => "Colon",
        ',' => "Comma",
        ' ' | '_' => "",
        other => return format!("U{:04X}", u32::from(other)),
    };
    word.to_string()
}

/// Enum variant name for a string case value.
///
/// Values with any letters or digits are segmented like keys (`legendonly`
/// becomes `LegendOnly`); pure-symbol values spell their symbols (`<=` becomes
/// `LessEqual`).
#[must_use]
pub fn to_variant_name(value: &str) -> String {
    if value.is_empty() {
        return "Empty".to_string();
    }
    let name: String = if value.chars().any(|c| c.is_ascii_alphanumeric()) {
        to_type_name(value)
    } else {
        value.chars().map(symbol_word).collect()
    };
    if name.is_empty() {
        "Empty".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{name}")
    } else if name == "Self" {
        "Self_".to_string()
    } else {
        name
    }
}

/// Variant name for a numeric case: `V{n}`, with `.` spelled `_` and `-` as `Neg`.
#[must_use]
pub fn numeric_variant_name(literal: &str) -> String {
    let body: String = literal
        .chars()
        .map(|c| match c {
            '-' => "Neg".to_string(),
            '.' => "_".to_string(),
            '+' => String::new(),
            other => other.to_string(),
        })
        .collect();
    format!("V{body}")
}

/// Disambiguate case names that collide after conversion by suffixing `0`,
/// `1`, ... to every member of a colliding group; order is preserved. An index
/// already taken by another name is skipped.
#[must_use]
pub fn disambiguate(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *counts.entry(name.clone()).or_insert(0) += 1;
    }
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut next_index: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            if counts.get(&name).copied().unwrap_or(0) <= 1 {
                return name;
            }
            let index: &mut usize = next_index.entry(name.clone()).or_insert(0);
            let mut suffixed: String = format!("{name}{index}");
            while taken.contains(&suffixed) {
                *index += 1;
                suffixed = format!("{name}{index}");
            }
            *index += 1;
            taken.insert(suffixed.clone());
            suffixed
        })
        .collect()
}

fn escape_keyword(name: String) -> String {
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else {
        name
    }
}

/// Field name as written after `self.` or in a setter; raw identifiers keep
/// their `r#` prefix, setter method names strip it when a prefix is added.
#[must_use]
pub fn bare_identifier(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}
