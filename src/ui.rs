use console::{measure_text_width, Style};
use sitepass::Error;
use zeroize::Zeroizing;

pub struct DisplayOptions {
    pub color_support: bool,
}

/// One output line: a site name and its derived password or the reason it failed.
pub struct Row<'a> {
    pub name: &'a str,
    pub outcome: Result<Zeroizing<String>, Error>,
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Display width of the widest site name.
pub fn name_column_width<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .map(measure_text_width)
        .max()
        .unwrap_or(0)
}

/// Pads after `name:` so every value starts one column past the widest name.
/// ANSI styling is ignored when measuring.
pub fn padding(name: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(measure_text_width(name)) + 1)
}

pub fn format_row(name: &str, value: &str, width: usize) -> String {
    format!("{}:{}{}", name, padding(name, width), value)
}

pub fn display_passwords(rows: &[Row<'_>], options: &DisplayOptions) {
    let width = name_column_width(rows.iter().map(|row| row.name));

    let (name_style, warn_style) = if options.color_support {
        (Style::new().bold(), Style::new().yellow())
    } else {
        (Style::new(), Style::new())
    };

    for row in rows {
        let name = name_style.apply_to(row.name).to_string();
        let value = match &row.outcome {
            Ok(password) => Zeroizing::new(password.to_string()),
            Err(err) => {
                let warning = warn_style.apply_to(format!("[!] {}", err));
                Zeroizing::new(warning.to_string())
            }
        };
        let line = Zeroizing::new(format_row(&name, &value, width));
        println!("{}", line.as_str());
    }
}
