use std::env;

use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct PromptRenderer {
    color_support: ColorSupport,
}

impl PromptRenderer {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Build the `venule:~ <cwd>: ` prompt for the next read. The working
    /// directory is sampled here, every pass, so a `cd` shows up immediately.
    pub fn render(&self) -> String {
        let cwd = env::current_dir()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        if matches!(self.color_support, ColorSupport::NoColor) {
            return format!("venule:~{}: ", cwd);
        }

        let name_style = Style::builder().foreground(Color::Cyan).build();
        let cwd_style = Style::builder().foreground(Color::Magenta).build();

        format!(
            "{}{}",
            "venule:~".style(name_style),
            format!("{}: ", cwd).style(cwd_style)
        )
    }
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_shell() {
        let rendered = PromptRenderer::new().render();
        assert!(rendered.contains("venule:~"));
    }

    #[test]
    fn prompt_tracks_the_working_directory() {
        let cwd = env::current_dir().expect("cwd").display().to_string();
        let rendered = PromptRenderer::new().render();
        assert!(rendered.contains(&cwd));
    }
}
