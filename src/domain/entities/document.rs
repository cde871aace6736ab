use serde::{Deserialize, Serialize};
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use uuid::Uuid;

/// Smallest budget that still fits any UTF-8 character.
const MIN_CHUNK_BYTES: usize = 4;

/// A retrievable unit of page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub source: String,
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(source: impl Into<String>, content: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            content: content.into(),
            chunk_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Splits content into chunks by paragraph boundaries.
///
/// Paragraphs are joined until they exceed `chunk_size` bytes, then a new chunk
/// starts. A single paragraph longer than `chunk_size` is wrapped at word
/// boundaries first, and a word longer than that is cut at a character boundary.
/// Each chunk is assigned a sequential index starting from 0.
pub fn chunk_content(source: &str, content: &str, chunk_size: usize) -> Vec<DocumentChunk> {
    let chunk_size = chunk_size.max(MIN_CHUNK_BYTES);
    let paragraphs: Vec<String> = content
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .flat_map(|p| split_oversized(p, chunk_size))
        .collect();

    let mut chunks = Vec::new();
    let mut current_chunk = String::new();
    let mut chunk_index = 0;

    for paragraph in paragraphs {
        let would_exceed = !current_chunk.is_empty()
            && current_chunk.len() + paragraph.len() + 2 > chunk_size;

        if would_exceed {
            chunks.push(DocumentChunk::new(source, &current_chunk, chunk_index));
            current_chunk.clear();
            chunk_index += 1;
        }

        if !current_chunk.is_empty() {
            current_chunk.push_str("\n\n");
        }
        current_chunk.push_str(&paragraph);
    }

    if !current_chunk.is_empty() {
        chunks.push(DocumentChunk::new(source, current_chunk, chunk_index));
    }

    chunks
}

/// A word whose width is its length in bytes.
#[derive(Debug)]
struct ByteWord<'a>(&'a str);

impl Fragment for ByteWord<'_> {
    fn width(&self) -> f64 {
        self.0.len() as f64
    }

    fn whitespace_width(&self) -> f64 {
        1.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

fn split_oversized(paragraph: &str, chunk_size: usize) -> Vec<String> {
    if paragraph.len() <= chunk_size {
        return vec![paragraph.to_string()];
    }

    let words: Vec<ByteWord<'_>> = paragraph
        .split_whitespace()
        .flat_map(|word| split_word(word, chunk_size))
        .map(ByteWord)
        .collect();

    wrap_first_fit(&words, &[chunk_size as f64])
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|word| word.0)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Cuts `word` into pieces of at most `max` bytes. `max` must fit one character.
fn split_word(word: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;
    while rest.len() > max {
        let mut cut = max;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}
