use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use papagayo_remap_core::{
    apply_plan, bake_frames, build_plan_with_table, parse_events, Config, PhonemeTable, RemapPlan,
    TimeRemapTarget,
};

/// Compiler configured once, reused for many `.pgo` texts.
#[wasm_bindgen]
pub struct PapagayoRemap {
    config: Config,
    table: PhonemeTable,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Serialize maps as plain objects so host scripts can read fields directly.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, swb::Error> {
    value.serialize(&swb::Serializer::json_compatible())
}

/// Host curve backed by two JS callbacks on an object:
/// `setHoldKey(time, value)` and `removeInitialKey()`.
struct JsRemapTarget {
    set_hold_key: Function,
    remove_initial_key: Function,
}

impl JsRemapTarget {
    fn from_object(obj: &JsValue) -> Result<Self, JsError> {
        let method = |name: &str| -> Result<Function, JsError> {
            Reflect::get(obj, &JsValue::from_str(name))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
                .ok_or_else(|| JsError::new(&format!("target is missing method {name}")))
        };
        Ok(Self {
            set_hold_key: method("setHoldKey")?,
            remove_initial_key: method("removeInitialKey")?,
        })
    }
}

impl TimeRemapTarget for JsRemapTarget {
    type Error = JsValue;

    fn set_hold_key(&mut self, time_seconds: f64, value: f64) -> Result<(), JsValue> {
        self.set_hold_key
            .call2(
                &JsValue::UNDEFINED,
                &JsValue::from_f64(time_seconds),
                &JsValue::from_f64(value),
            )
            .map(|_| ())
    }

    fn remove_initial_key(&mut self) -> Result<(), JsValue> {
        self.remove_initial_key.call0(&JsValue::UNDEFINED).map(|_| ())
    }
}

#[wasm_bindgen]
impl PapagayoRemap {
    /// Create a compiler. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new PapagayoRemap({ target_frame_rate: 12, unresolved: "skip" })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PapagayoRemap, JsError> {
        console_error_panic_hook::set_once();

        let config: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let table = config
            .phoneme_set
            .build()
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(PapagayoRemap { config, table })
    }

    /// Phoneme tokens in mouth strip order.
    #[wasm_bindgen]
    pub fn strip(&self) -> Vec<String> {
        self.table.tokens().to_vec()
    }

    /// Ordered `{frame, phoneme}` events of a `.pgo` text.
    #[wasm_bindgen(js_name = parse_events)]
    pub fn parse_events(&self, text: &str) -> Result<JsValue, JsError> {
        to_js(&parse_events(text))
            .map_err(|e| JsError::new(&format!("parse_events output error: {e}")))
    }

    /// Compile a `.pgo` text into a remap plan object.
    #[wasm_bindgen]
    pub fn compile(&self, name: &str, text: &str) -> Result<JsValue, JsError> {
        let plan = self.plan(name, text)?;
        to_js(&plan).map_err(|e| JsError::new(&format!("compile output error: {e}")))
    }

    /// One shape index per source frame.
    #[wasm_bindgen]
    pub fn bake(&self, name: &str, text: &str) -> Result<Vec<i32>, JsError> {
        Ok(bake_frames(&self.plan(name, text)?).shapes)
    }

    /// Compile and apply directly to a JS target object. Returns the number of keys set.
    #[wasm_bindgen]
    pub fn apply(&self, name: &str, text: &str, target: JsValue) -> Result<u32, JsValue> {
        let plan = self.plan(name, text)?;
        let mut target = JsRemapTarget::from_object(&target)?;
        let n = apply_plan(&plan, &mut target)?;
        Ok(n as u32)
    }

    fn plan(&self, name: &str, text: &str) -> Result<RemapPlan, JsError> {
        build_plan_with_table(name, text, &self.config, &self.table)
            .map_err(|e| JsError::new(&format!("compile error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
