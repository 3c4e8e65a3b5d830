/// Placeholder accepting one decimal digit.
pub const DIGIT_PLACEHOLDER: char = '9';

/// Reformats the full current input against a mask template.
///
/// Each `9` in the mask consumes the next digit of `raw`; non-digit input is
/// skipped while the mask position holds. Any other mask character is emitted
/// as-is, and swallows one input character when the user already typed it.
/// Output ends as soon as either side runs out, so partial input never gets
/// trailing literals.
pub fn apply(mask: &str, raw: &str) -> String {
    let mut output = String::with_capacity(mask.len());
    let mut input = raw.chars().peekable();

    'mask: for slot in mask.chars() {
        if input.peek().is_none() {
            break;
        }
        if slot == DIGIT_PLACEHOLDER {
            loop {
                match input.next() {
                    Some(ch) if ch.is_ascii_digit() => {
                        output.push(ch);
                        continue 'mask;
                    }
                    Some(_) => continue,
                    None => break 'mask,
                }
            }
        } else {
            output.push(slot);
            if input.peek() == Some(&slot) {
                input.next();
            }
        }
    }

    output
}
