//! Filesystem-safe image filenames.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes a URL basename safe to join under an image directory.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Limits length to 255 bytes, cutting on a char boundary
///
/// Everything else is kept verbatim so the saved name matches the URL basename.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if replaced.len() <= NAME_MAX {
        return replaced;
    }
    let mut take = NAME_MAX;
    while take > 0 && !replaced.is_char_boundary(take) {
        take -= 1;
    }
    replaced[..take].to_string()
}
