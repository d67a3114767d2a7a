//! Easing curves named the way the page's timelines name them
//! (`power3.out`, `back.out(2)`, `elastic.out(1,0.3)`).

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Which end of the curve the easing applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EaseDir {
    In,
    #[default]
    Out,
    InOut,
}

/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    #[default]
    Linear,
    /// `power{n}` with n in 1..=3 (quad, cubic, quart).
    Power(u8, EaseDir),
    /// Overshooting ease-out with the given overshoot strength.
    BackOut(f64),
    /// Spring ease-out with amplitude and period.
    ElasticOut(f64, f64),
}

/// Samples used when an easing has no cubic-bezier equivalent.
const CSS_LINEAR_SAMPLES: u16 = 24;

impl Ease {
    pub const POWER1_OUT: Ease = Ease::Power(1, EaseDir::Out);
    pub const POWER1_IN_OUT: Ease = Ease::Power(1, EaseDir::InOut);
    pub const POWER2_IN_OUT: Ease = Ease::Power(2, EaseDir::InOut);
    pub const POWER2_OUT: Ease = Ease::Power(2, EaseDir::Out);
    pub const POWER3_OUT: Ease = Ease::Power(3, EaseDir::Out);
    pub const POWER3_IN_OUT: Ease = Ease::Power(3, EaseDir::InOut);

    /// The `elastic.out(1,0.3)` spring used by entrance animations.
    pub fn elastic() -> Self {
        Ease::ElasticOut(1.0, 0.3)
    }

    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power(power, dir) => {
                let exp = i32::from(power.clamp(1, 3)) + 1;
                match dir {
                    EaseDir::In => t.powi(exp),
                    EaseDir::Out => 1.0 - (1.0 - t).powi(exp),
                    EaseDir::InOut => {
                        if t < 0.5 {
                            (2.0 * t).powi(exp) / 2.0
                        } else {
                            1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                        }
                    }
                }
            }
            Ease::BackOut(overshoot) => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
            Ease::ElasticOut(amplitude, period) => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let amplitude = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
                amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
            }
        }
    }

    /// CSS `transition-timing-function` approximating this curve.
    pub fn css(&self) -> String {
        match *self {
            Ease::Linear => "linear".to_string(),
            Ease::Power(power, dir) => {
                let bezier = match (power.clamp(1, 3), dir) {
                    (1, EaseDir::In) => "0.55, 0.085, 0.68, 0.53",
                    (1, EaseDir::Out) => "0.25, 0.46, 0.45, 0.94",
                    (1, EaseDir::InOut) => "0.455, 0.03, 0.515, 0.955",
                    (2, EaseDir::In) => "0.55, 0.055, 0.675, 0.19",
                    (2, EaseDir::Out) => "0.215, 0.61, 0.355, 1",
                    (2, EaseDir::InOut) => "0.645, 0.045, 0.355, 1",
                    (_, EaseDir::In) => "0.895, 0.03, 0.685, 0.22",
                    (_, EaseDir::Out) => "0.165, 0.84, 0.44, 1",
                    (_, EaseDir::InOut) => "0.77, 0, 0.175, 1",
                };
                format!("cubic-bezier({bezier})")
            }
            Ease::BackOut(overshoot) => {
                format!("cubic-bezier(0.34, {:.3}, 0.64, 1)", 1.0 + overshoot * 0.28)
            }
            Ease::ElasticOut(..) => {
                let steps = f64::from(CSS_LINEAR_SAMPLES);
                let points: Vec<String> = (0..=CSS_LINEAR_SAMPLES)
                    .map(|i| format!("{:.4}", self.apply(f64::from(i) / steps)))
                    .collect();
                format!("linear({})", points.join(", "))
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Ease::Linear => write!(f, "none"),
            Ease::Power(power, dir) => {
                let dir = match dir {
                    EaseDir::In => "in",
                    EaseDir::Out => "out",
                    EaseDir::InOut => "inOut",
                };
                write!(f, "power{power}.{dir}")
            }
            Ease::BackOut(overshoot) => write!(f, "back.out({overshoot})"),
            Ease::ElasticOut(amplitude, period) => {
                write!(f, "elastic.out({amplitude},{period})")
            }
        }
    }
}

/// Parse the comma-separated numeric arguments of `name(a,b)`.
fn parse_args(args: Option<&str>) -> Result<Vec<f64>, FolioError> {
    let Some(args) = args else {
        return Ok(Vec::new());
    };
    args.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| {
            a.parse::<f64>()
                .map_err(|_| FolioError::Config(format!("bad easing argument '{a}'")))
        })
        .collect()
}

impl FromStr for Ease {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, args) = match s.split_once('(') {
            Some((head, rest)) => (head, Some(rest.trim_end_matches(')'))),
            None => (s, None),
        };
        let (name, dir) = head.split_once('.').unwrap_or((head, "out"));
        let dir = match dir {
            "in" => EaseDir::In,
            "out" => EaseDir::Out,
            "inOut" => EaseDir::InOut,
            other => return Err(FolioError::Config(format!("unknown easing direction '{other}'"))),
        };
        let args = parse_args(args)?;

        match name {
            "none" | "linear" => Ok(Ease::Linear),
            "power1" | "quad" => Ok(Ease::Power(1, dir)),
            "power2" | "cubic" => Ok(Ease::Power(2, dir)),
            "power3" | "quart" => Ok(Ease::Power(3, dir)),
            "back" if dir == EaseDir::Out => {
                Ok(Ease::BackOut(args.first().copied().unwrap_or(1.70158)))
            }
            "elastic" if dir == EaseDir::Out => Ok(Ease::ElasticOut(
                args.first().copied().unwrap_or(1.0),
                args.get(1).copied().unwrap_or(0.3),
            )),
            other => Err(FolioError::Config(format!("unsupported easing '{other}'"))),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}
