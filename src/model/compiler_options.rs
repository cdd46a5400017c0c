//! Compiler options.
//!
//! The snapshot passes these through untouched. The only logic here is
//! layering: a project declares default options, per-configuration options,
//! and per-framework options, and [`CompilerOptions::combine`] folds them into
//! the effective set.

use serde::{Deserialize, Serialize};

/// Options handed to the compiler. Every field is optional so that layers can
/// be combined; `None` means "not set at this layer".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompilerOptions {
    /// Preprocessor symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defines: Option<Vec<String>>,
    /// Language version, e.g. `csharp6`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    /// Target platform, e.g. `anycpu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Allow `unsafe` blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_unsafe: Option<bool>,
    /// Promote warnings to errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings_as_errors: Option<bool>,
    /// Enable optimizations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimize: Option<bool>,
    /// Strong-name key file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    /// Delay-sign the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_sign: Option<bool>,
    /// Public-sign the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_sign: Option<bool>,
    /// Debug symbol format, e.g. `portable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_type: Option<String>,
    /// Produce an executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_entry_point: Option<bool>,
    /// Emit XML documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_xml_documentation: Option<bool>,
    /// Warning codes to suppress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_warnings: Option<Vec<String>>,
    /// Extra raw compiler arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_arguments: Option<Vec<String>>,
}

/// Later value wins when set.
fn overlay<T: Clone>(base: &mut Option<T>, layer: Option<&T>) {
    if let Some(value) = layer {
        *base = Some(value.clone());
    }
}

/// Union of both lists, first occurrence order.
fn union(base: &mut Option<Vec<String>>, layer: Option<&[String]>) {
    let Some(extra) = layer else { return };
    let merged = base.get_or_insert_with(Vec::new);
    for item in extra {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
}

impl CompilerOptions {
    /// Fold option layers, later layers overriding earlier ones.
    ///
    /// Scalar options take the last set value; list options (`defines`,
    /// `suppress_warnings`, `additional_arguments`) accumulate without
    /// duplicates.
    #[must_use]
    pub fn combine<'a>(layers: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut out = Self::default();
        for layer in layers {
            union(&mut out.defines, layer.defines.as_deref());
            overlay(&mut out.language_version, layer.language_version.as_ref());
            overlay(&mut out.platform, layer.platform.as_ref());
            overlay(&mut out.allow_unsafe, layer.allow_unsafe.as_ref());
            overlay(&mut out.warnings_as_errors, layer.warnings_as_errors.as_ref());
            overlay(&mut out.optimize, layer.optimize.as_ref());
            overlay(&mut out.key_file, layer.key_file.as_ref());
            overlay(&mut out.delay_sign, layer.delay_sign.as_ref());
            overlay(&mut out.public_sign, layer.public_sign.as_ref());
            overlay(&mut out.debug_type, layer.debug_type.as_ref());
            overlay(&mut out.emit_entry_point, layer.emit_entry_point.as_ref());
            overlay(&mut out.generate_xml_documentation, layer.generate_xml_documentation.as_ref());
            union(&mut out.suppress_warnings, layer.suppress_warnings.as_deref());
            union(&mut out.additional_arguments, layer.additional_arguments.as_deref());
        }
        out
    }
}
