/// Character budget for one reply chunk, kept under Telegram's 4096 cap.
pub const DEFAULT_MESSAGE_BUDGET: usize = 4000;

/// Joins blocks that share a chunk.
pub const BLOCK_SEPARATOR: &str = "\n\n";

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Greedily pack `blocks` into chunks of at most `budget` characters.
///
/// Blocks are never split: a chunk boundary only falls between two blocks, and
/// a block longer than `budget` becomes a chunk of its own. No empty chunk is
/// ever emitted.
#[must_use]
pub fn batch_messages<S: AsRef<str>>(blocks: &[S], budget: usize) -> Vec<String> {
    let separator_len = char_count(BLOCK_SEPARATOR);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in blocks {
        let block = block.as_ref();
        let block_len = char_count(block);

        if current.is_empty() {
            current.push_str(block);
            current_len = block_len;
            continue;
        }

        if current_len + separator_len + block_len > budget {
            chunks.push(std::mem::take(&mut current));
            current.push_str(block);
            current_len = block_len;
        } else {
            current.push_str(BLOCK_SEPARATOR);
            current.push_str(block);
            current_len += separator_len + block_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn hard_split(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for ch in text.chars() {
        if current_len == max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(ch);
        current_len += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split text that a transport cannot send in one piece: prefer line breaks,
/// fall back to a hard character split for single overlong lines.
///
/// Concatenating the result reproduces `text` exactly.
#[must_use]
pub fn split_for_transport(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }

    if char_count(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = char_count(line);

        if line_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(hard_split(line, max_chars));
            continue;
        }

        if current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
