// WASM bindings for the kana cipher engines.
//
// Provides a `WasmCodebook` class exported via wasm-bindgen that wraps the
// `Codebook` from kana-cipher. Catalogue entries, call results and pigpen
// glyphs cross the boundary as plain objects through serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const book = new WasmCodebook();
//   book.engines();                                  // => [{ id: "caesar", params: [...] }, ...]
//   book.encrypt("caesar", "かな", { shift: 3 });     // => { output: "けね", glyphs: null, usedKey: null }
//   book.decrypt("caesar", "けね", { shift: 3 });     // => { output: "かな", glyphs: null, usedKey: null }
//   book.encrypt("pigpen", "かな", {});               // => { output: null, glyphs: [{ kind: "cell", ... }], ... }
//   book.decryptGlyphs(glyphs);                      // => "かな"

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use kana_cipher::{
    CipherError, CipherOutput, Codebook, EngineId, EngineInfo, Encryption, KeySet, ParamKind,
    PigpenGlyph,
};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a key parameter.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsParam {
    id: &'static str,
    label: &'static str,
    /// "number", "text" or "choice".
    kind: &'static str,
    min: Option<i64>,
    max: Option<i64>,
    options: Option<Vec<&'static str>>,
    default_value: String,
}

/// Serializable representation of a catalogue entry.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsEngine {
    id: &'static str,
    name: &'static str,
    name_en: &'static str,
    category: &'static str,
    era: &'static str,
    difficulty: u8,
    description: &'static str,
    output: &'static str,
    generates_key: bool,
    params: Vec<JsParam>,
}

/// Serializable representation of a call result. Exactly one of `output`
/// and `glyphs` is set.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsEncryption {
    output: Option<String>,
    glyphs: Option<Vec<JsGlyph>>,
    used_key: Option<String>,
}

/// Serializable representation of a pigpen glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsGlyph {
    /// "cell" or "passthrough".
    kind: String,
    #[serde(default)]
    grid: u8,
    #[serde(default)]
    pos: u8,
    #[serde(default)]
    dot: bool,
    /// Plaintext symbol for cells, the copied character for passthrough.
    #[serde(default)]
    text: String,
}

/// A key value as JavaScript sends it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum JsKeyValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl JsKeyValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
            Self::Number(n) => n.to_string(),
            Self::Flag(flag) => flag.to_string(),
        }
    }
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn param_to_js(spec: &kana_cipher::ParamSpec) -> JsParam {
    let (kind, min, max, options) = match spec.kind {
        ParamKind::Number { min, max, .. } => ("number", Some(min), Some(max), None),
        ParamKind::Text { .. } => ("text", None, None, None),
        ParamKind::Choice { options, .. } => ("choice", None, None, Some(options.to_vec())),
    };
    JsParam {
        id: spec.id,
        label: spec.label,
        kind,
        min,
        max,
        options,
        default_value: spec.default_value(),
    }
}

fn engine_to_js(info: &EngineInfo) -> JsEngine {
    JsEngine {
        id: info.id.id(),
        name: info.name,
        name_en: info.name_en,
        category: info.category.id(),
        era: info.era,
        difficulty: info.difficulty,
        description: info.description,
        output: match info.output {
            kana_cipher::OutputKind::Text => "text",
            kana_cipher::OutputKind::Glyphs => "glyphs",
        },
        generates_key: info.generates_key,
        params: info.params.iter().map(param_to_js).collect(),
    }
}

fn glyph_to_js(glyph: &PigpenGlyph) -> JsGlyph {
    match *glyph {
        PigpenGlyph::Cell {
            grid,
            pos,
            dot,
            original,
        } => JsGlyph {
            kind: "cell".to_string(),
            grid,
            pos,
            dot,
            text: original.to_string(),
        },
        PigpenGlyph::Passthrough(ch) => JsGlyph {
            kind: "passthrough".to_string(),
            grid: 0,
            pos: 0,
            dot: false,
            text: ch.to_string(),
        },
    }
}

/// Rebuild a glyph. Passthrough glyphs with no character are skipped;
/// a cell keeps `?` as its display symbol when none was sent.
fn glyph_from_js(glyph: JsGlyph) -> Option<PigpenGlyph> {
    let first = glyph.text.chars().next();
    if glyph.kind == "cell" {
        Some(PigpenGlyph::Cell {
            grid: glyph.grid,
            pos: glyph.pos,
            dot: glyph.dot,
            original: first.unwrap_or(kana_cipher::symbolic::pigpen::UNKNOWN_CELL),
        })
    } else {
        first.map(PigpenGlyph::Passthrough)
    }
}

fn encryption_to_js(result: Encryption) -> JsEncryption {
    let (output, glyphs) = match result.output {
        CipherOutput::Text(text) => (Some(text), None),
        CipherOutput::Glyphs(glyphs) => (None, Some(glyphs.iter().map(glyph_to_js).collect())),
    };
    JsEncryption {
        output,
        glyphs,
        used_key: result.used_key,
    }
}

fn key_set_from(values: BTreeMap<String, JsKeyValue>) -> KeySet {
    values
        .into_iter()
        .map(|(id, value)| (id, value.into_string()))
        .collect()
}

fn keys_from_js(keys: JsValue) -> Result<KeySet, JsError> {
    if keys.is_undefined() || keys.is_null() {
        return Ok(KeySet::new());
    }
    let values: BTreeMap<String, JsKeyValue> = serde_wasm_bindgen::from_value(keys)
        .map_err(|e| JsError::new(&format!("invalid keys: {e}")))?;
    Ok(key_set_from(values))
}

fn cipher_error_to_js(e: CipherError) -> JsError {
    JsError::new(&e.to_string())
}

// ============================================================================
// WasmCodebook
// ============================================================================

/// Kana cipher engines for WebAssembly.
#[wasm_bindgen]
pub struct WasmCodebook {
    book: Codebook,
}

#[wasm_bindgen]
impl WasmCodebook {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCodebook {
        WasmCodebook {
            book: Codebook::new(),
        }
    }

    /// The engine catalogue, in display order.
    ///
    /// Returns a JavaScript array of engine objects with fields: `id`,
    /// `name`, `nameEn`, `category`, `era`, `difficulty`, `description`,
    /// `output` ("text" or "glyphs"), `generatesKey` and `params`.
    pub fn engines(&self) -> Result<JsValue, JsError> {
        let engines: Vec<JsEngine> = EngineId::ALL.iter().map(|e| engine_to_js(e.info())).collect();
        serde_wasm_bindgen::to_value(&engines).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Engine ids only.
    #[wasm_bindgen(js_name = "engineIds")]
    pub fn engine_ids(&self) -> js_sys::Array {
        EngineId::ALL
            .iter()
            .map(|e| JsValue::from_str(e.id()))
            .collect()
    }

    /// Encrypt `text` with engine `id`.
    ///
    /// `keys` is an object of parameter values (strings or numbers); missing
    /// or invalid values fall back to the parameter defaults. Returns
    /// `{ output, glyphs, usedKey }`.
    pub fn encrypt(&self, id: &str, text: &str, keys: JsValue) -> Result<JsValue, JsError> {
        let keys = keys_from_js(keys)?;
        let result = self
            .book
            .encrypt(id, text, &keys)
            .map_err(cipher_error_to_js)?;
        serde_wasm_bindgen::to_value(&encryption_to_js(result))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Decrypt `text` with engine `id`. Returns `{ output, glyphs, usedKey }`.
    pub fn decrypt(&self, id: &str, text: &str, keys: JsValue) -> Result<JsValue, JsError> {
        let keys = keys_from_js(keys)?;
        let result = self
            .book
            .decrypt(id, text, &keys)
            .map_err(cipher_error_to_js)?;
        serde_wasm_bindgen::to_value(&encryption_to_js(result))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Read pigpen glyphs (as returned by `encrypt("pigpen", ...)`) back into text.
    #[wasm_bindgen(js_name = "decryptGlyphs")]
    pub fn decrypt_glyphs(&self, glyphs: JsValue) -> Result<String, JsError> {
        let glyphs: Vec<JsGlyph> = serde_wasm_bindgen::from_value(glyphs)
            .map_err(|e| JsError::new(&format!("invalid glyphs: {e}")))?;
        let glyphs: Vec<PigpenGlyph> = glyphs.into_iter().filter_map(glyph_from_js).collect();
        let result = self
            .book
            .decrypt(EngineId::Pigpen.id(), &glyphs, &KeySet::new())
            .map_err(cipher_error_to_js)?;
        Ok(result.output.as_text().unwrap_or_default().to_string())
    }
}

impl Default for WasmCodebook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_become_integer_strings() {
        assert_eq!(JsKeyValue::Number(3.0).into_string(), "3");
        assert_eq!(JsKeyValue::Number(-2.0).into_string(), "-2");
        assert_eq!(JsKeyValue::Number(2.5).into_string(), "2.5");
        assert_eq!(JsKeyValue::Text("V".into()).into_string(), "V");
    }

    #[test]
    fn key_set_from_mixed_values() {
        let mut values = BTreeMap::new();
        values.insert("shift".to_string(), JsKeyValue::Number(5.0));
        values.insert("alphabet".to_string(), JsKeyValue::Text("seion".into()));
        let keys = key_set_from(values);
        assert_eq!(keys.get("shift"), Some("5"));
        assert_eq!(keys.get("alphabet"), Some("seion"));
    }

    #[test]
    fn glyphs_survive_the_boundary() {
        let book = Codebook::new();
        let enc = book.encrypt("pigpen", "かな!", &KeySet::new()).unwrap();
        let glyphs = enc.output.as_glyphs().unwrap();
        let js: Vec<JsGlyph> = glyphs.iter().map(glyph_to_js).collect();
        assert_eq!(js[2].kind, "passthrough");
        let back: Vec<PigpenGlyph> = js.into_iter().filter_map(glyph_from_js).collect();
        assert_eq!(back, glyphs);
    }

    #[test]
    fn cell_without_text_still_decodes() {
        let glyph = JsGlyph {
            kind: "cell".to_string(),
            grid: 0,
            pos: 0,
            dot: false,
            text: String::new(),
        };
        let back = glyph_from_js(glyph).unwrap();
        let book = Codebook::new();
        let out = book.decrypt("pigpen", &vec![back], &KeySet::new()).unwrap();
        assert_eq!(out.output.as_text(), Some("あ"));
    }

    #[test]
    fn catalogue_dto_lists_params() {
        let js = engine_to_js(EngineId::Caesar.info());
        assert_eq!(js.id, "caesar");
        assert_eq!(js.output, "text");
        let shift = &js.params[0];
        assert_eq!((shift.kind, shift.min, shift.max), ("number", Some(1), Some(79)));
        assert_eq!(shift.default_value, "3");
        assert!(js.params.iter().any(|p| p.options.is_some()));
    }

    #[test]
    fn encryption_dto_sets_one_output() {
        let book = Codebook::new();
        let enc = book.encrypt("otp", "かな", &KeySet::new()).unwrap();
        let js = encryption_to_js(enc);
        assert!(js.output.is_some() && js.glyphs.is_none());
        assert_eq!(js.used_key.map(|k| k.chars().count()), Some(2));
    }
}
