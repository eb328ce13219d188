use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub payload: fn(&str) -> String,
    pub error: fn(&str) -> String,
    pub busy: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub field: fn(&str) -> String,
    pub value: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp() // Fallback to default
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            label: |s| s.cyan().to_string(),
            payload: |s| s.white().bold().to_string(),
            error: |s| s.red().to_string(),
            busy: |s| s.bright_black().italic().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            field: |s| s.green().to_string(),
            value: |s| s.white().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            title: |s| s.red().italic().bold().underline().to_string(),
            label: |s| s.green().italic().to_string(),
            payload: |s| s.bright_white().to_string(),
            error: |s| s.bright_red().bold().to_string(),
            busy: |s| s.bright_yellow().dimmed().italic().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            field: |s| s.cyan().to_string(),
            value: |s| s.bright_white().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            label: |s| s.bright_cyan().bold().to_string(),
            payload: |s| s.black().to_string(),
            error: |s| s.red().bold().to_string(),
            busy: |s| s.bright_black().italic().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            field: |s| s.magenta().to_string(),
            value: |s| s.black().to_string(),
        }
    }
}
