/// Characters after which text may be split without cutting a clause.
const BOUNDARIES: &[char] = &['.', ',', '!', '?', ';', ':', '।', '|', '\n'];

/// Splits `text` into pieces of at most `max_chars` characters, preferring
/// punctuation boundaries, then whitespace. Words longer than `max_chars`
/// are cut. Pieces are trimmed and never empty.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut packer = Packer::new(max_chars);

    for clause in clauses(text) {
        if char_len(clause) <= max_chars {
            packer.push(clause);
            continue;
        }
        for word in clause.split_whitespace() {
            if char_len(word) <= max_chars {
                packer.push(word);
            } else {
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_chars) {
                    packer.push(&piece.iter().collect::<String>());
                }
            }
        }
    }
    packer.finish()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn clauses(text: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if BOUNDARIES.contains(&c) {
            let end = index + c.len_utf8();
            clauses.push(text[start..end].trim());
            start = end;
        }
    }
    clauses.push(text[start..].trim());
    clauses.into_iter().filter(|clause| !clause.is_empty()).collect()
}

struct Packer {
    max_chars: usize,
    chunks: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, unit: &str) {
        let unit_len = char_len(unit);
        if self.current_len > 0 && self.current_len + 1 + unit_len > self.max_chars {
            self.flush();
        }
        if self.current_len > 0 {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(unit);
        self.current_len += unit_len;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.chunks.push(std::mem::take(&mut self.current));
        }
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.chunks
    }
}
