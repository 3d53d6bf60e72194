pub const BASE_INSTRUCTION: &str = "Transcribe this audio to text. Rules:
- Keep original language (Armenian/English/Russian mix is common)
- Remove filler words (uh, um, like)
- Clean up false starts and repetitions
- Output only the clean transcription text";

/// Builds the instruction sent alongside the audio. Blank hints are dropped.
pub fn render_instruction(language: Option<&str>, prompt: Option<&str>) -> String {
    let mut instruction = String::from(BASE_INSTRUCTION);

    if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
        instruction.push_str("\nLanguage: ");
        instruction.push_str(language);
    }
    if let Some(prompt) = prompt.map(str::trim).filter(|p| !p.is_empty()) {
        instruction.push_str("\nContext: ");
        instruction.push_str(prompt);
    }

    instruction
}
