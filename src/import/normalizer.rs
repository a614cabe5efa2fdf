/// Strip byte-order marks and zero-width characters that spreadsheet
/// exports sneak in, then collapse runs of whitespace. Case is preserved
/// because certification names are matched verbatim against the rulebook.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_text(value)
}
