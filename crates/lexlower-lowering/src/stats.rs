//! Lowering statistics.

use serde::Serialize;
use std::fmt;

/// A declaration that had to be renamed on its way to function scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rename {
    pub old_name: String,
    pub new_name: String,
    pub line: u32,
}

/// Per-file counts of lowered declarators and the renames they needed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoweringStats {
    pub consts: u32,
    pub lets: u32,
    pub renames: Vec<Rename>,
}

impl LoweringStats {
    /// Count one lowered declarator of a `const` or `let` list.
    pub fn declarator(&mut self, is_const: bool) {
        if is_const {
            self.consts += 1;
        } else {
            self.lets += 1;
        }
    }

    pub fn rename(&mut self, old_name: &str, new_name: &str, line: u32) {
        self.renames.push(Rename {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            line,
        });
    }

    /// `consts / lets` as shown in the report.
    pub fn ratio(&self) -> String {
        match (self.consts, self.lets) {
            (0, 0) => "n/a".to_string(),
            (_, 0) => "∞".to_string(),
            (consts, lets) => format!("{}x", to_precision_2(f64::from(consts) / f64::from(lets))),
        }
    }
}

/// Two significant digits, switching to exponent notation outside
/// `[1e-6, 100)`.
fn to_precision_2(value: f64) -> String {
    let scientific = format!("{value:.1e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if !(-6..2).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{}", exponent.abs());
    }
    let decimals = (1 - exponent).max(0) as usize;
    format!("{value:.decimals$}")
}

/// ```text
/// 0.50x const/let ratio (1 consts, 2 lets)
/// line 4: x => x$0
/// ```
impl fmt::Display for LoweringStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} const/let ratio ({} consts, {} lets)",
            self.ratio(),
            self.consts,
            self.lets
        )?;

        let mut renames: Vec<&Rename> = self.renames.iter().collect();
        renames.sort_by_key(|rename| rename.line);
        for rename in renames {
            write!(f, "\nline {}: {} => {}", rename.line, rename.old_name, rename.new_name)?;
        }
        writeln!(f)
    }
}
