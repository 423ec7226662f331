// src/typeset.rs

//! Converts TeX math fragments in plot labels into Unicode text.
//!
//! The bitmap backend has no TeX engine, so `$...$` segments are rewritten
//! into plain glyphs: `"Distance ($\AA$)"` becomes `"Distance (Å)"`.

use tracing::debug;

/// TeX commands with a direct Unicode replacement.
const COMMANDS: &[(&str, &str)] = &[
    ("AA", "Å"),
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("theta", "θ"),
    ("kappa", "κ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("varphi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Sigma", "Σ"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("Omega", "Ω"),
    ("circ", "°"),
    ("degree", "°"),
    ("pm", "±"),
    ("times", "×"),
    ("cdot", "·"),
    ("approx", "≈"),
    ("sim", "∼"),
    ("leq", "≤"),
    ("geq", "≥"),
    ("neq", "≠"),
    ("infty", "∞"),
    ("rightarrow", "→"),
    ("leftarrow", "←"),
    ("%", "%"),
    ("_", "_"),
    ("&", "&"),
    ("$", "$"),
    (",", " "),
    (";", " "),
    (" ", " "),
];

/// Commands whose braced argument is kept as-is.
const WRAPPERS: &[&str] = &["mathrm", "text", "textrm", "mathit", "textit", "mathbf", "textbf"];

fn superscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        'i' => 'ⁱ',
        '°' => '°',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        'h' => 'ₕ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'p' => 'ₚ',
        's' => 'ₛ',
        't' => 'ₜ',
        _ => return None,
    })
}

/// Renders a label for display. Text outside `$...$` is kept except for
/// escaped characters; math segments are converted to Unicode.
pub fn render_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_math = false;
    let mut segment = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'$') => {
                chars.next();
                if in_math {
                    segment.push('$');
                } else {
                    out.push('$');
                }
            }
            '$' => {
                if in_math {
                    out.push_str(&render_math(&segment));
                    segment.clear();
                }
                in_math = !in_math;
            }
            _ if in_math => segment.push(c),
            _ => out.push(c),
        }
    }

    // Unterminated math is rendered as if it had been closed.
    if in_math {
        out.push_str(&render_math(&segment));
    }
    out
}

/// Converts the body of one math segment.
pub fn render_math(math: &str) -> String {
    let chars: Vec<char> = math.chars().collect();
    let mut out = String::with_capacity(math.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let (command, next) = read_command(&chars, i + 1);
                i = next;
                if WRAPPERS.contains(&command.as_str()) {
                    let (group, after) = read_group(&chars, i);
                    out.push_str(&render_math(&group));
                    i = after;
                } else if let Some((_, glyph)) =
                    COMMANDS.iter().find(|(name, _)| *name == command)
                {
                    out.push_str(glyph);
                } else {
                    debug!("Unknown TeX command '\\{command}' kept verbatim");
                    out.push('\\');
                    out.push_str(&command);
                }
            }
            '^' | '_' => {
                let script = chars[i];
                let (group, after) = read_group(&chars, i + 1);
                i = after;
                let rendered = render_math(&group);
                out.push_str(&map_script(&rendered, script == '^'));
            }
            '{' | '}' => i += 1,
            '~' => {
                out.push(' ');
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Reads a command name starting at `start`. Letter runs form one name;
/// otherwise a single symbol character is the name.
fn read_command(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_alphabetic() {
        end += 1;
    }
    if end == start && start < chars.len() {
        end = start + 1;
    }
    (chars[start..end].iter().collect(), end)
}

/// Reads either a `{...}` group (nesting aware) or a single token.
fn read_group(chars: &[char], start: usize) -> (String, usize) {
    if start >= chars.len() {
        return (String::new(), start);
    }
    if chars[start] == '\\' {
        let (command, end) = read_command(chars, start + 1);
        return (format!("\\{command}"), end);
    }
    if chars[start] != '{' {
        return (chars[start].to_string(), start + 1);
    }

    let mut depth = 0usize;
    let mut end = start;
    while end < chars.len() {
        match chars[end] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (chars[start + 1..end].iter().collect(), end + 1);
                }
            }
            _ => {}
        }
        end += 1;
    }
    (chars[start + 1..].iter().collect(), chars.len())
}

/// Maps every character to its super/subscript form, falling back to a
/// caret/underscore prefix when any character has no such glyph.
fn map_script(text: &str, superscript_mode: bool) -> String {
    let mapper = if superscript_mode { superscript } else { subscript };
    let mapped: Option<String> = text.chars().map(mapper).collect();
    match mapped {
        Some(s) => s,
        None => {
            let marker = if superscript_mode { '^' } else { '_' };
            format!("{marker}{text}")
        }
    }
}
