//! The `.slvs` text grammar (`spec.md` §6.2): a three-byte magic, a version
//! line, then repeated `Type.field=value` blocks each closed by an
//! `AddGroup`/`AddRequest`/`AddConstraint`/`AddStyle` marker and a blank
//! line. Grounded on `examples/original_source/src/file.cpp`'s
//! `SaveUsingTable`/`LoadUsingTable`, field-for-field adapted to this
//! crate's own record schemas (`crate::model`) rather than the reference
//! design's raw struct layout.

use std::fmt::Write as _;

use crate::IoError;

/// The fixed three-byte prefix every `.slvs` file opens with, matching
/// `file.cpp`'s `VERSION_STRING` magic (chosen so a text editor or `file(1)`
/// can't mistake a sketch for plain text).
pub const MAGIC: [u8; 3] = [0o261, 0o262, 0o263];
/// The version banner following the magic bytes.
pub const VERSION_LINE: &str = "SolveSpaceREVa";

/// One `Type.field=value` block as parsed off disk, in file order. `kind` is
/// the `Type` shared by every field in the block (mixed-type blocks are a
/// parse error) and `marker` is the `AddXxx` line that closed it.
#[derive(Clone, Debug, Default)]
pub struct RawRecord {
    pub kind: String,
    pub fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn get_hex(&self, key: &str) -> Result<u32, IoError> {
        let raw = self.get(key).ok_or_else(|| IoError::MissingField(self.kind.clone(), key.to_string()))?;
        u32::from_str_radix(raw, 16).map_err(|_| IoError::BadField(self.kind.clone(), key.to_string()))
    }

    pub fn get_hex_opt(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|raw| u32::from_str_radix(raw, 16).ok())
    }

    pub fn get_u32(&self, key: &str) -> Result<u32, IoError> {
        let raw = self.get(key).ok_or_else(|| IoError::MissingField(self.kind.clone(), key.to_string()))?;
        raw.parse().map_err(|_| IoError::BadField(self.kind.clone(), key.to_string()))
    }

    pub fn get_u32_or(&self, key: &str, default: u32) -> u32 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, IoError> {
        let raw = self.get(key).ok_or_else(|| IoError::MissingField(self.kind.clone(), key.to_string()))?;
        raw.parse().map_err(|_| IoError::BadField(self.kind.clone(), key.to_string()))
    }

    pub fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v != "0").unwrap_or(false)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key).unwrap_or("").to_string()
    }

    /// A multi-line block field's inner lines (see [`RecordBuilder::block`]);
    /// empty if the field is absent.
    pub fn get_block(&self, key: &str) -> Vec<&str> {
        self.get(key).map(|v| v.lines().collect()).unwrap_or_default()
    }
}

/// A block under construction while writing: the same shape as
/// [`RawRecord`], built with fluent setters so `crate::model`'s converters
/// can skip a field entirely when it's the type's default, mirroring
/// `file.cpp`'s "items that aren't specified are assumed to be zero".
#[derive(Clone, Debug, Default)]
pub struct RecordBuilder {
    pub kind: String,
    pub fields: Vec<(String, String)>,
}

impl RecordBuilder {
    pub fn new(kind: &str) -> Self { RecordBuilder { kind: kind.to_string(), fields: Vec::new() } }

    pub fn hex(mut self, key: &str, value: u32) -> Self {
        if value != 0 {
            self.fields.push((key.to_string(), format!("{value:08x}")));
        }
        self
    }

    pub fn u32(mut self, key: &str, value: u32) -> Self {
        if value != 0 {
            self.fields.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn f64(mut self, key: &str, value: f64) -> Self {
        if value != 0.0 {
            self.fields.push((key.to_string(), format!("{value:.20}")));
        }
        self
    }

    pub fn bool(mut self, key: &str, value: bool) -> Self {
        if value {
            self.fields.push((key.to_string(), "1".to_string()));
        }
        self
    }

    /// Like [`Self::bool`], but always writes the field. Use for flags whose
    /// natural default is `true` (`skip-if-false` would silently flip them
    /// back to `true` on load).
    pub fn bool_always(mut self, key: &str, value: bool) -> Self {
        self.fields.push((key.to_string(), if value { "1" } else { "0" }.to_string()));
        self
    }

    pub fn string(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.fields.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// A multi-line `{ ... }`-delimited block value (`file.cpp`'s `case 'M'`
    /// remap table is the one field that needs this). `lines` holds the
    /// block's inner lines already formatted; skipped entirely when empty.
    pub fn block(mut self, key: &str, lines: Vec<String>) -> Self {
        if !lines.is_empty() {
            self.fields.push((key.to_string(), lines.join("\n")));
        }
        self
    }

    fn into_raw(self) -> RawRecord { RawRecord { kind: self.kind, fields: self.fields } }
}

/// The whole parsed document, section by section, in file order.
#[derive(Default)]
pub struct Document {
    pub groups: Vec<RawRecord>,
    pub requests: Vec<RawRecord>,
    pub constraints: Vec<RawRecord>,
    pub styles: Vec<RawRecord>,
}

fn marker_for(kind: &str) -> Option<&'static str> {
    match kind {
        "Group" => Some("AddGroup"),
        "Request" => Some("AddRequest"),
        "Constraint" => Some("AddConstraint"),
        "Style" => Some("AddStyle"),
        _ => None,
    }
}

/// Serializes a parsed document back into `.slvs` bytes (the magic header
/// isn't valid UTF-8 on its own, so the grammar is written as bytes rather
/// than `String`).
pub fn write_document(doc: &Document) -> Vec<u8> {
    let mut text = String::new();
    let _ = write!(text, "{VERSION_LINE}\n\n\n");
    for builders in [&doc.groups, &doc.requests, &doc.constraints, &doc.styles] {
        for record in builders {
            let marker = marker_for(&record.kind).expect("record kind must map to a known marker");
            for (key, value) in &record.fields {
                if value.contains('\n') {
                    let _ = writeln!(text, "{}.{}={{", record.kind, key);
                    for inner in value.split('\n') {
                        let _ = writeln!(text, "{inner}");
                    }
                    let _ = writeln!(text, "}}");
                } else {
                    let _ = writeln!(text, "{}.{}={}", record.kind, key, value);
                }
            }
            let _ = writeln!(text, "{marker}\n");
        }
    }
    let mut out = Vec::with_capacity(MAGIC.len() + text.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(text.as_bytes());
    out
}

/// Builds a [`RawRecord`] from a fluent [`RecordBuilder`], for callers that
/// want the `file.cpp`-style skip-if-default behavior without hand-rolling
/// the field list.
pub fn record(builder: RecordBuilder) -> RawRecord { builder.into_raw() }

/// Parses `.slvs` bytes into a [`Document`].
pub fn parse_document(bytes: &[u8]) -> Result<Document, IoError> {
    let body = bytes.strip_prefix(&MAGIC[..]).ok_or(IoError::BadHeader)?;
    let text = std::str::from_utf8(body).map_err(|_| IoError::BadHeader)?;
    let mut lines = text.lines();
    let header = lines.next().ok_or(IoError::BadHeader)?;
    if header != VERSION_LINE {
        return Err(IoError::BadHeader);
    }

    let mut doc = Document::default();
    let mut current_kind: Option<String> = None;
    let mut current_fields: Vec<(String, String)> = Vec::new();

    // A block field consumes extra lines from `lines` mid-iteration (see
    // below), so this can't be a `for` loop over the iterator itself.
    #[allow(clippy::while_let_on_iterator)]
    while let Some(line) = lines.next() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if let Some(kind) = marker_to_kind(line) {
            let record = RawRecord { kind: current_kind.take().ok_or(IoError::BadHeader)?, fields: std::mem::take(&mut current_fields) };
            match kind {
                "Group" => doc.groups.push(record),
                "Request" => doc.requests.push(record),
                "Constraint" => doc.constraints.push(record),
                "Style" => doc.styles.push(record),
                _ => {}
            }
            continue;
        }
        let Some((key, value)) = line.split_once('=') else { continue };
        let Some((kind, field)) = key.split_once('.') else { continue };
        if current_kind.is_none() {
            current_kind = Some(kind.to_string());
        }
        if value == "{" {
            let mut block_lines = Vec::new();
            for inner in lines.by_ref() {
                let inner = inner.trim_end_matches('\r');
                if inner == "}" {
                    break;
                }
                block_lines.push(inner.to_string());
            }
            current_fields.push((field.to_string(), block_lines.join("\n")));
        } else {
            current_fields.push((field.to_string(), value.to_string()));
        }
    }
    Ok(doc)
}

fn marker_to_kind(line: &str) -> Option<&'static str> {
    match line {
        "AddGroup" => Some("Group"),
        "AddRequest" => Some("Request"),
        "AddConstraint" => Some("Constraint"),
        "AddStyle" => Some("Style"),
        _ => None,
    }
}
