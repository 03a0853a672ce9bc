//! After Effects script output.
//!
//! The script targets the first selected layer of the active composition,
//! enables time remapping on it and sets one hold key per keyframe.

use std::fmt::{self, Write};

use papagayo_remap_core::{apply_plan, RemapPlan, TimeRemapTarget};

/// Accumulates ExtendScript statements for a time-remap curve.
pub struct JsxScript {
    body: String,
}

impl JsxScript {
    fn new() -> Self {
        Self {
            body: String::new(),
        }
    }
}

impl TimeRemapTarget for JsxScript {
    type Error = fmt::Error;

    fn set_hold_key(&mut self, time_seconds: f64, value: f64) -> fmt::Result {
        writeln!(self.body, "\tsetHoldKey({time_seconds}, {value});")
    }

    fn remove_initial_key(&mut self) -> fmt::Result {
        writeln!(self.body, "\tremap.removeKey(1);")
    }
}

/// Render a complete script applying `plan`.
pub fn render(plan: &RemapPlan) -> Result<String, fmt::Error> {
    let mut keys = JsxScript::new();
    apply_plan(plan, &mut keys)?;

    let mut out = String::new();
    let undo = js_string(&format!("Lip-sync from {}", plan.name));
    writeln!(out, "// Generated from {}", plan.name)?;
    writeln!(out, "// Mouth strip order: {}", plan.strip.join(", "))?;
    writeln!(out, "{{")?;
    writeln!(out, "\tvar comp = app.project.activeItem;")?;
    writeln!(
        out,
        "\tif (!(comp instanceof CompItem) || comp.selectedLayers.length !== 1) {{"
    )?;
    writeln!(
        out,
        "\t\tthrow new Error(\"Select the mouth layer in the target composition.\");"
    )?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\tapp.beginUndoGroup({undo});")?;
    writeln!(out, "\tvar layer = comp.selectedLayers[0];")?;
    writeln!(out, "\tlayer.timeRemapEnabled = true;")?;
    // time remap lets the layer run past its source length
    writeln!(
        out,
        "\tlayer.outPoint = layer.inPoint + {};",
        plan.duration_seconds
    )?;
    writeln!(out, "\tvar remap = layer.property(\"Time Remap\");")?;
    // enabling time remap adds keys at in and out; keep only the first
    writeln!(out, "\twhile (remap.numKeys > 1) remap.removeKey(remap.numKeys);")?;
    writeln!(out, "\tfunction setHoldKey(t, v) {{")?;
    writeln!(out, "\t\tvar i = remap.addKey(t);")?;
    writeln!(out, "\t\tremap.setValueAtKey(i, v);")?;
    writeln!(
        out,
        "\t\tremap.setInterpolationTypeAtKey(i, KeyframeInterpolationType.HOLD);"
    )?;
    writeln!(out, "\t}}")?;
    out.push_str(&keys.body);
    writeln!(out, "\tapp.endUndoGroup();")?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
