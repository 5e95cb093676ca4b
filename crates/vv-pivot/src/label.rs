/// Period label with embedded line breaks folded into single spaces.
pub fn clean_label(label: &str) -> String {
    label.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
