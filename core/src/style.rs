use colored::{Color, ColoredString, Colorize};

use crate::testing::JudgeCode;

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for JudgeCode {
    fn color(&self) -> Color {
        use JudgeCode::*;
        if !self::is_truecolor_supported() {
            return match self {
                AC => Color::Green,
                WA => Color::Yellow,
                TLE => Color::Red,
                RE => Color::Magenta,
                NoOutput | MissingOutputFile => Color::Blue,
                ExecutableNotFound | InternalError => Color::BrightRed,
            };
        }

        match self {
            AC => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WA => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TLE => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RE => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
            NoOutput | MissingOutputFile => Color::TrueColor {
                r: 60,
                g: 110,
                b: 210,
            },
            ExecutableNotFound | InternalError => Color::TrueColor {
                r: 120,
                g: 120,
                b: 120,
            },
        }
    }
}

/// Short judge code on a colored badge, padded to a fixed width.
pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightWhite
    };
    format!(" {:<3} ", judge.to_string())
        .on_color(judge.color())
        .bold()
        .color(fg)
}
