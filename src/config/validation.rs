//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never fail a load.

use std::collections::HashSet;

use super::WellTestConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for WellTestConfig.
///
/// Any new field added to WellTestConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        // [reservoir]
        "reservoir",
        "reservoir.formation_volume_factor",
        "reservoir.viscosity_cp",
        "reservoir.thickness_ft",
        "reservoir.porosity",
        "reservoir.total_compressibility_per_psi",
        "reservoir.wellbore_radius_ft",
        "reservoir.initial_pressure_psia",
        // [drawdown]
        "drawdown",
        "drawdown.rate_stb_d",
        "drawdown.boundary_index",
        // [constant_pressure]
        "constant_pressure",
        "constant_pressure.flowing_pressure_psia",
        // [output]
        "output",
        "output.format",
        "output.precision",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so output is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((bk, bd)) if bd < dist || (bd == dist && bk <= k) => Some((bk, bd)),
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Error if `value` is not finite or not strictly positive.
fn check_positive(name: &str, value: f64, unit: &str, errors: &mut Vec<String>) -> bool {
    if value.is_finite() && value > 0.0 {
        true
    } else {
        errors.push(format!("{name} = {value} {unit} must be finite and > 0"));
        false
    }
}

/// Warn if `value` lies outside the typical field range `[lo, hi]`.
fn check_typical(
    name: &str,
    value: f64,
    (lo, hi): (f64, f64),
    unit: &str,
    warnings: &mut Vec<ValidationWarning>,
) {
    if value < lo || value > hi {
        warnings.push(ValidationWarning {
            field: name.to_string(),
            message: format!("{name} = {value} is outside typical range ({lo}-{hi} {unit})"),
            suggestion: None,
        });
    }
}

/// Validate physical ranges on a parsed WellTestConfig.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent an analysis; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(config: &WellTestConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let r = &config.reservoir;

    if check_positive("reservoir.formation_volume_factor", r.formation_volume_factor, "rb/STB", &mut errors) {
        check_typical("reservoir.formation_volume_factor", r.formation_volume_factor, (0.5, 5.0), "rb/STB", &mut warnings);
    }
    if check_positive("reservoir.viscosity_cp", r.viscosity_cp, "cp", &mut errors) {
        check_typical("reservoir.viscosity_cp", r.viscosity_cp, (0.01, 10_000.0), "cp", &mut warnings);
    }
    if check_positive("reservoir.thickness_ft", r.thickness_ft, "ft", &mut errors) {
        check_typical("reservoir.thickness_ft", r.thickness_ft, (1.0, 2_000.0), "ft", &mut warnings);
    }
    if check_positive("reservoir.porosity", r.porosity, "", &mut errors) {
        if r.porosity > 1.0 {
            errors.push(format!(
                "reservoir.porosity = {} must be a fraction no greater than 1",
                r.porosity
            ));
        } else {
            check_typical("reservoir.porosity", r.porosity, (0.01, 0.5), "fraction", &mut warnings);
        }
    }
    if check_positive("reservoir.total_compressibility_per_psi", r.total_compressibility_per_psi, "1/psi", &mut errors) {
        check_typical("reservoir.total_compressibility_per_psi", r.total_compressibility_per_psi, (1e-7, 1e-2), "1/psi", &mut warnings);
    }
    if check_positive("reservoir.wellbore_radius_ft", r.wellbore_radius_ft, "ft", &mut errors) {
        check_typical("reservoir.wellbore_radius_ft", r.wellbore_radius_ft, (0.1, 2.0), "ft", &mut warnings);
    }
    if check_positive("reservoir.initial_pressure_psia", r.initial_pressure_psia, "psia", &mut errors) {
        check_typical("reservoir.initial_pressure_psia", r.initial_pressure_psia, (14.7, 30_000.0), "psia", &mut warnings);
    }

    if let Some(d) = &config.drawdown {
        if let Some(q) = d.rate_stb_d {
            check_positive("drawdown.rate_stb_d", q, "STB/D", &mut errors);
        }
        if d.boundary_index == Some(0) {
            errors.push("drawdown.boundary_index = 0 leaves no middle-time region".to_string());
        }
    }

    if let Some(pwf) = config.constant_pressure.and_then(|c| c.flowing_pressure_psia) {
        if !pwf.is_finite() || pwf < 0.0 {
            errors.push(format!(
                "constant_pressure.flowing_pressure_psia = {pwf} must be finite and >= 0"
            ));
        } else if pwf >= r.initial_pressure_psia {
            errors.push(format!(
                "constant_pressure.flowing_pressure_psia = {pwf} must be below reservoir.initial_pressure_psia = {}",
                r.initial_pressure_psia
            ));
        }
    }

    if config.output.precision > 12 {
        warnings.push(ValidationWarning {
            field: "output.precision".to_string(),
            message: format!(
                "output.precision = {} exceeds the 12 significant decimals an f64 carries",
                config.output.precision
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
