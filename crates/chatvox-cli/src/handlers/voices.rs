//! Voices command handler.

use chatvox_core::{VoiceOption, voice_options};

/// Render the voice picker as aligned `value  label` lines.
pub fn render(options: &[VoiceOption]) -> String {
    let width = options.iter().map(|o| o.value.len()).max().unwrap_or(0);
    options
        .iter()
        .map(|o| format!("{:width$}  {}", o.value, o.label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn execute() {
    println!("{}", render(&voice_options()));
}
