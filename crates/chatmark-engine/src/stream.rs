//! # Message Streams
//!
//! The assistant's reply arrives in chunks. [`MessageStream`] accumulates
//! them and re-parses the whole prefix after every chunk, so the rendered
//! blocks always reflect everything received so far. Once the stream ends,
//! [`MessageStream::finish`] gives the final blocks and the query trigger
//! (the `[query:...]` the host should run automatically, if any).

use crate::parsing::{ContentBlock, KeyedBlock, Parser, extract_query_trigger, keyed};

#[derive(Debug, Default)]
pub struct MessageStream {
    parser: Parser,
    text: String,
    blocks: Vec<ContentBlock>,
    chunks: usize,
}

/// Final state of a completed message.
#[derive(Debug, Clone, PartialEq)]
pub struct Finished {
    pub blocks: Vec<ContentBlock>,
    pub query_trigger: Option<String>,
}

impl MessageStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(parser: Parser) -> Self {
        Self {
            parser,
            ..Self::default()
        }
    }

    /// Appends `chunk` and re-parses the accumulated text.
    pub fn push_chunk(&mut self, chunk: &str) -> &[ContentBlock] {
        self.text.push_str(chunk);
        self.chunks += 1;
        self.blocks = self.parser.parse(&self.text);
        log::trace!(
            "chunk {}: {} bytes so far, {} blocks",
            self.chunks,
            self.text.len(),
            self.blocks.len()
        );
        &self.blocks
    }

    /// Blocks for the text received so far.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Current blocks with keys that stay put while a block is unchanged.
    pub fn keyed_blocks(&self) -> Vec<KeyedBlock> {
        keyed(self.blocks.clone())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> Finished {
        log::debug!(
            "message complete after {} chunks: {} blocks",
            self.chunks,
            self.blocks.len()
        );
        Finished {
            query_trigger: extract_query_trigger(&self.text),
            blocks: self.blocks,
        }
    }
}
