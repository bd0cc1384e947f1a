// Dweve LedgerCSV - Dialect-tolerant delimited text ingestion
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Repeated-enclosure detection.
//!
//! Legacy exporters sometimes wrap every field in the enclosure character
//! repeated `d` times (`""value""` instead of `"value"`). The detector finds
//! the single depth the whole line agrees on.
//!
//! Segment boundaries depend on the depth: inside a field wrapped at depth
//! `d`, a delimiter only ends the field when it directly follows an
//! enclosure run of length `d + 2k`. Every other interior run must have even
//! length (doubled escapes). At an even depth such a closing run is itself
//! even, so it may also be read as escapes followed by a literal delimiter;
//! the scanner backtracks over those choices until every segment is wrapped
//! (or, when lenient, every unwrapped segment is free of enclosures).
//!
//! The detector tries every plausible depth, from the longest enclosure run
//! in the line down to 1. A clean split beats one that only parses, then the
//! depth that yields the most fields wins, preferring the deeper wrap on a
//! tie.
//!
//! # Examples
//!
//! ```
//! use ledgercsv_core::{Detection, Dialect, EnclosureDetector, EnclosureStrictness};
//!
//! let strict = EnclosureDetector::new(Dialect::comma(), EnclosureStrictness::Strict);
//! assert_eq!(strict.detect(r#"""A"",""B"",""C"""#), Detection::Uniform(2));
//! assert_eq!(strict.detect(r#""Feld1","Feld2","#), Detection::Mixed);
//! assert_eq!(strict.detect("a,b,c"), Detection::Uniform(0));
//!
//! let lenient = EnclosureDetector::new(Dialect::comma(), EnclosureStrictness::Lenient);
//! assert_eq!(lenient.detect(r#""Feld1","Feld2","#), Detection::Uniform(1));
//! ```

use crate::config::{Dialect, EnclosureStrictness, Limits};

/// Outcome of depth detection for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Every segment agrees on this depth. `0` means no enclosure is used.
    Uniform(usize),
    /// Segments disagree, or the line is not valid at any depth.
    Mixed,
    /// A configured outer wrapper is missing.
    NoMatch,
}

impl Detection {
    /// The detected depth, `0` unless uniform.
    #[inline]
    pub fn depth(self) -> usize {
        match self {
            Self::Uniform(d) => d,
            _ => 0,
        }
    }

    /// Whether a single depth was agreed on.
    #[inline]
    pub fn is_uniform(self) -> bool {
        matches!(self, Self::Uniform(_))
    }
}

/// Detects the uniform wrap depth of a line.
#[derive(Debug, Clone)]
pub struct EnclosureDetector {
    dialect: Dialect,
    strictness: EnclosureStrictness,
    max_depth: usize,
}

impl EnclosureDetector {
    pub fn new(dialect: Dialect, strictness: EnclosureStrictness) -> Self {
        Self {
            dialect,
            strictness,
            max_depth: Limits::default().max_wrap_depth,
        }
    }

    /// Bound the depths considered.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn strictness(&self) -> EnclosureStrictness {
        self.strictness
    }

    /// Detect the depth of `line`.
    pub fn detect(&self, line: &str) -> Detection {
        let Some(body) = self.dialect.strip_outer(line) else {
            return Detection::NoMatch;
        };
        let chars: Vec<char> = body.chars().collect();
        match self.resolve(&chars) {
            Some((depth, _)) => Detection::Uniform(depth),
            None => Detection::Mixed,
        }
    }

    /// Detect the depth of `line`, reporting `0` for anything but a uniform line.
    #[inline]
    pub fn detect_depth(&self, line: &str) -> usize {
        self.detect(line).depth()
    }

    /// Find the depth and segments for an already stripped body.
    pub(crate) fn resolve(&self, chars: &[char]) -> Option<(usize, Vec<Segment>)> {
        let enclosure = self.dialect.enclosure;
        let delimiter = self.dialect.delimiter;
        let ceiling = longest_run(chars, enclosure).min(self.max_depth);

        let mut best: Option<(bool, usize, Vec<Segment>)> = None;
        for depth in (1..=ceiling).rev() {
            let state = ParseState::new(chars, delimiter, enclosure, depth);
            let (clean, segments) = match state.clean_split(self.strictness) {
                Some(segments) => (true, segments),
                None => match state.split() {
                    Ok(segments) => (false, segments),
                    Err(_) => continue,
                },
            };
            let wrapped = segments.iter().filter(|s| s.wrapped).count();
            let accepted = match self.strictness {
                EnclosureStrictness::Strict => wrapped == segments.len(),
                EnclosureStrictness::Lenient => wrapped > 0,
            };
            if !accepted {
                continue;
            }
            // Deeper candidates were visited first, so ties keep the deeper one.
            let better = best
                .as_ref()
                .map_or(true, |(c, _, b)| (clean, segments.len()) > (*c, b.len()));
            if better {
                best = Some((clean, depth, segments));
            }
        }

        if let Some((_, depth, segments)) = best {
            return Some((depth, segments));
        }
        if is_unquoted(chars, delimiter, enclosure) {
            return Some((0, split_plain(chars, delimiter)));
        }
        None
    }
}

/// Detect the depth of `line` with the default depth ceiling.
pub fn detect_depth(line: &str, dialect: &Dialect, strictness: EnclosureStrictness) -> usize {
    EnclosureDetector::new(*dialect, strictness).detect_depth(line)
}

/// A delimiter-separated span of a line, in char indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: usize,
    pub end: usize,
    pub wrapped: bool,
}

impl Segment {
    /// Field value of this segment at `depth`.
    pub fn value(&self, chars: &[char], depth: usize, enclosure: char) -> String {
        if self.wrapped {
            unescape(&chars[self.start + depth..self.end - depth], enclosure)
        } else {
            chars[self.start..self.end].iter().collect()
        }
    }
}

/// Why a segment could not be read at a given depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentFault {
    /// Leading run shorter than the depth.
    Shallow { column: usize, start: usize, found: usize },
    /// No closing run before the end of the line.
    Unterminated { column: usize, start: usize },
    /// An interior run of odd length.
    OddInteriorRun { column: usize, start: usize },
}

impl SegmentFault {
    pub fn column(&self) -> usize {
        match self {
            Self::Shallow { column, .. }
            | Self::Unterminated { column, .. }
            | Self::OddInteriorRun { column, .. } => *column,
        }
    }

    pub fn start(&self) -> usize {
        match self {
            Self::Shallow { start, .. }
            | Self::Unterminated { start, .. }
            | Self::OddInteriorRun { start, .. } => *start,
        }
    }

    pub fn reason(&self, depth: usize) -> String {
        match self {
            Self::Shallow { found, .. } => {
                format!("field wrapped {} deep, expected {}", found, depth)
            }
            Self::Unterminated { .. } => {
                format!("no closing run of depth {} before end of line", depth)
            }
            Self::OddInteriorRun { .. } => {
                format!("unescaped enclosure inside field at depth {}", depth)
            }
        }
    }
}

/// Scanner state for one line at one depth hypothesis.
struct ParseState<'a> {
    chars: &'a [char],
    delimiter: char,
    enclosure: char,
    depth: usize,
    pos: usize,
    column: usize,
    in_quoted: bool,
}

impl<'a> ParseState<'a> {
    fn new(chars: &'a [char], delimiter: char, enclosure: char, depth: usize) -> Self {
        Self {
            chars,
            delimiter,
            enclosure,
            depth,
            pos: 0,
            column: 0,
            in_quoted: false,
        }
    }

    fn run_len(&self, at: usize) -> usize {
        self.chars[at..]
            .iter()
            .take_while(|&&c| c == self.enclosure)
            .count()
    }

    fn at_boundary(&self, at: usize) -> bool {
        at == self.chars.len() || self.chars[at] == self.delimiter
    }

    fn next_delimiter(&self, from: usize) -> usize {
        self.chars[from..]
            .iter()
            .position(|&c| c == self.delimiter)
            .map_or(self.chars.len(), |p| from + p)
    }

    /// Read the segment starting at `self.pos`.
    fn segment(&mut self) -> Result<Segment, SegmentFault> {
        let start = self.pos;
        let lead = self.run_len(start);

        if lead == 0 {
            let end = self.next_delimiter(start);
            return Ok(Segment {
                start,
                end,
                wrapped: false,
            });
        }
        if lead < self.depth {
            return Err(SegmentFault::Shallow {
                column: self.column,
                start,
                found: lead,
            });
        }

        self.in_quoted = true;
        let mut i = start + self.depth;
        while self.in_quoted {
            if i >= self.chars.len() {
                return Err(SegmentFault::Unterminated {
                    column: self.column,
                    start,
                });
            }
            if self.chars[i] != self.enclosure {
                i += 1;
                continue;
            }
            let run = self.run_len(i);
            let after = i + run;
            if self.at_boundary(after) && run >= self.depth && (run - self.depth) % 2 == 0 {
                self.in_quoted = false;
                i = after;
            } else if run % 2 == 1 {
                return Err(SegmentFault::OddInteriorRun {
                    column: self.column,
                    start,
                });
            } else {
                i = after;
            }
        }

        Ok(Segment {
            start,
            end: i,
            wrapped: true,
        })
    }

    /// Every segment that can start at `start` and still be clean, shortest first.
    fn candidates(&self, start: usize, strictness: EnclosureStrictness) -> Vec<Segment> {
        let lead = self.run_len(start);
        if lead == 0 {
            let end = self.next_delimiter(start);
            if strictness.is_strict() || self.chars[start..end].contains(&self.enclosure) {
                return Vec::new();
            }
            return vec![Segment {
                start,
                end,
                wrapped: false,
            }];
        }

        let mut ends = Vec::new();
        if lead < self.depth {
            return ends;
        }
        let mut i = start + self.depth;
        while i < self.chars.len() {
            if self.chars[i] != self.enclosure {
                i += 1;
                continue;
            }
            let run = self.run_len(i);
            let after = i + run;
            if self.at_boundary(after) && run >= self.depth && (run - self.depth) % 2 == 0 {
                ends.push(Segment {
                    start,
                    end: after,
                    wrapped: true,
                });
            }
            if run % 2 == 1 {
                break;
            }
            i = after;
        }
        ends
    }

    /// Depth-first search for a split in which every segment is clean.
    ///
    /// Positions already shown to have no clean continuation are not
    /// revisited, so each start position is expanded at most once.
    fn clean_split(&self, strictness: EnclosureStrictness) -> Option<Vec<Segment>> {
        let len = self.chars.len();
        let mut dead = vec![false; len + 1];
        let mut frames = vec![Frame {
            start: 0,
            options: self.candidates(0, strictness),
            next: 0,
        }];
        let mut path: Vec<Segment> = Vec::new();

        while let Some(frame) = frames.last_mut() {
            let Some(&segment) = frame.options.get(frame.next) else {
                dead[frame.start] = true;
                frames.pop();
                path.pop();
                continue;
            };
            frame.next += 1;

            if segment.end >= len {
                path.push(segment);
                return Some(path);
            }
            let start = segment.end + 1;
            if dead[start] {
                continue;
            }
            path.push(segment);
            frames.push(Frame {
                start,
                options: self.candidates(start, strictness),
                next: 0,
            });
        }
        None
    }

    /// Greedy split closing every field at its first closing run.
    fn split(mut self) -> Result<Vec<Segment>, SegmentFault> {
        let mut segments = Vec::new();
        loop {
            let segment = self.segment()?;
            segments.push(segment);
            if segment.end >= self.chars.len() {
                return Ok(segments);
            }
            self.pos = segment.end + 1;
            self.column += 1;
        }
    }
}

/// One level of the clean-split search.
struct Frame {
    start: usize,
    options: Vec<Segment>,
    next: usize,
}

/// Split `chars` into segments assuming every wrapped field has `depth`.
///
/// A clean split is preferred; otherwise the greedy split reports the first
/// fault, or a split with unwrapped segments for the caller to judge.
pub(crate) fn split_at_depth(
    chars: &[char],
    delimiter: char,
    enclosure: char,
    depth: usize,
    strictness: EnclosureStrictness,
) -> Result<Vec<Segment>, SegmentFault> {
    let state = ParseState::new(chars, delimiter, enclosure, depth);
    match state.clean_split(strictness) {
        Some(segments) => Ok(segments),
        None => state.split(),
    }
}

/// Split on every delimiter, ignoring enclosures.
pub(crate) fn split_plain(chars: &[char], delimiter: char) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c == delimiter {
            segments.push(Segment {
                start,
                end: i,
                wrapped: false,
            });
            start = i + 1;
        }
    }
    segments.push(Segment {
        start,
        end: chars.len(),
        wrapped: false,
    });
    segments
}

/// Whether no plain segment opens with the enclosure.
fn is_unquoted(chars: &[char], delimiter: char, enclosure: char) -> bool {
    split_plain(chars, delimiter)
        .iter()
        .all(|s| chars[s.start..s.end].first() != Some(&enclosure))
}

fn longest_run(chars: &[char], enclosure: char) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for &c in chars {
        if c == enclosure {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Collapse every doubled enclosure in `interior` into one.
pub(crate) fn unescape(interior: &[char], enclosure: char) -> String {
    let mut out = String::with_capacity(interior.len());
    let mut i = 0;
    while i < interior.len() {
        let c = interior[i];
        if c == enclosure && interior.get(i + 1) == Some(&enclosure) {
            out.push(enclosure);
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}
