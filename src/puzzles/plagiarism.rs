//! Plagiarism detection by sentence alignment.
//!
//! Two documents are reduced to sentences of lowercase tokens, and the
//! search finds the cheapest way to walk through both at once: either
//! aligning the next sentence of each (paying their token edit distance)
//! or skipping a sentence of one document (paying its length). Closely
//! aligned pairs are reported as likely copies.

use std::fmt;
use std::io::Read;

use anyhow::Error;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use searcher::{Path, SearchError, SearchHeuristic, SearchProblem, SearchResult, Transition};
use tracing::info;

use super::{read_input, PuzzleError};
use crate::{solve, RunOptions, Strategy};

/// Aligned pairs at most this far apart are flagged.
pub const THRESHOLD: usize = 3;

pub type Sentence = Vec<String>;

/// Lowercase the text, split it into sentences on terminators and line
/// breaks, and drop punctuation. Empty sentences are discarded.
pub fn normalize(text: &str) -> Vec<Sentence> {
    lazy_static! {
        static ref TERMINATORS: Regex = Regex::new(r"[.!?\n]+").unwrap();
        static ref PUNCTUATION: Regex = Regex::new(r"[^\w\s]|_").unwrap();
    };

    let text = text.to_lowercase();
    TERMINATORS
        .split(&text)
        .map(|sentence| {
            PUNCTUATION
                .replace_all(sentence, "")
                .split_whitespace()
                .map(str::to_string)
                .collect::<Sentence>()
        })
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Edit distance between two sequences, counting insertions, deletions
/// and substitutions of whole elements.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let substitution = previous[j] + if x == y { 0 } else { 1 };
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Position in both documents: the next unhandled sentence of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    pub first: usize,
    pub second: usize,
}

impl Cursor {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Align {
        first: usize,
        second: usize,
        distance: usize,
    },
    SkipFirst(usize),
    SkipSecond(usize),
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Edit::Align {
                first,
                second,
                distance,
            } => write!(
                f,
                "align sentence {} with sentence {} (distance {})",
                first, second, distance
            ),
            Edit::SkipFirst(i) => write!(f, "skip sentence {} of the first document", i),
            Edit::SkipSecond(j) => write!(f, "skip sentence {} of the second document", j),
        }
    }
}

/// Sum over each remaining row of the cheapest way to dispose of it,
/// either skipping it or aligning it with some remaining column.
///
/// Entry `[row][column]` is the bound from that position onwards.
fn suffix_bounds(distances: &[Vec<usize>], skips: &[usize], columns: usize) -> Vec<Vec<usize>> {
    let mut bounds = vec![vec![0; columns + 1]; distances.len() + 1];

    for row in (0..distances.len()).rev() {
        let mut best = skips[row];
        for column in (0..=columns).rev() {
            if column < columns {
                best = best.min(distances[row][column]);
            }
            bounds[row][column] = bounds[row + 1][column] + best;
        }
    }

    bounds
}

/// The alignment problem for a pair of documents.
#[derive(Debug, Clone)]
pub struct Alignment {
    first: Vec<Sentence>,
    second: Vec<Sentence>,

    /// Token edit distance between each pair of sentences.
    distances: Vec<Vec<usize>>,

    /// Lower bounds on the cost of the remaining sentences of each document.
    first_bounds: Vec<Vec<usize>>,
    second_bounds: Vec<Vec<usize>>,
}

impl Alignment {
    pub fn new(first: Vec<Sentence>, second: Vec<Sentence>) -> Self {
        let distances: Vec<Vec<usize>> = first
            .iter()
            .map(|a| second.iter().map(|b| levenshtein(a, b)).collect())
            .collect();
        let transposed: Vec<Vec<usize>> = (0..second.len())
            .map(|j| distances.iter().map(|row| row[j]).collect())
            .collect();

        let first_skips: Vec<usize> = first.iter().map(Vec::len).collect();
        let second_skips: Vec<usize> = second.iter().map(Vec::len).collect();

        let first_bounds = suffix_bounds(&distances, &first_skips, second.len());
        let second_bounds = suffix_bounds(&transposed, &second_skips, first.len());

        Self {
            first,
            second,
            distances,
            first_bounds,
            second_bounds,
        }
    }

    /// Normalize two documents and align them.
    pub fn from_texts(first: &str, second: &str) -> Self {
        Self::new(normalize(first), normalize(second))
    }

    pub fn first(&self) -> &[Sentence] {
        &self.first
    }

    pub fn second(&self) -> &[Sentence] {
        &self.second
    }

    pub fn origin(&self) -> Cursor {
        Cursor::new(0, 0)
    }

    /// Summarise an alignment path.
    pub fn findings(&self, path: &Path<Cursor, Edit>, threshold: usize) -> Findings {
        let mut matches = Vec::new();
        let mut weight: f64 = 0.0;

        for edit in path.actions() {
            if let Edit::Align {
                first,
                second,
                distance,
            } = *edit
            {
                let longest = self.first[first].len().max(self.second[second].len());
                if longest > 0 {
                    weight += 1.0 - distance as f64 / longest as f64;
                } else {
                    weight += 1.0;
                }

                if distance <= threshold {
                    matches.push(Match {
                        first,
                        second,
                        distance,
                    });
                }
            }
        }

        let sentences = self.first.len().max(self.second.len());
        let similarity = if sentences == 0 {
            100.0
        } else {
            (weight * 100.0 / sentences as f64).min(100.0)
        };

        Findings {
            cost: path.cost(),
            matches,
            similarity,
        }
    }
}

impl SearchProblem for Alignment {
    type State = Cursor;
    type Action = Edit;

    fn check(&self, state: &Cursor) -> SearchResult<()> {
        if state.first > self.first.len() || state.second > self.second.len() {
            return Err(SearchError::InvalidState(format!(
                "{} is past the end of documents with {} and {} sentences",
                state,
                self.first.len(),
                self.second.len()
            )));
        }
        Ok(())
    }

    fn is_goal(&self, state: &Cursor) -> bool {
        state.first == self.first.len() && state.second == self.second.len()
    }

    fn successors(&self, state: &Cursor) -> Vec<Transition<Cursor, Edit>> {
        let Cursor { first, second } = *state;
        let mut moves = Vec::with_capacity(3);

        if first < self.first.len() && second < self.second.len() {
            let distance = self.distances[first][second];
            moves.push(Transition::new(
                Edit::Align {
                    first,
                    second,
                    distance,
                },
                Cursor::new(first + 1, second + 1),
                distance,
            ));
        }

        if first < self.first.len() {
            moves.push(Transition::new(
                Edit::SkipFirst(first),
                Cursor::new(first + 1, second),
                self.first[first].len(),
            ));
        }

        if second < self.second.len() {
            moves.push(Transition::new(
                Edit::SkipSecond(second),
                Cursor::new(first, second + 1),
                self.second[second].len(),
            ));
        }

        moves
    }
}

impl SearchHeuristic for Alignment {
    fn heuristic(&self, state: &Cursor) -> usize {
        let first = self.first_bounds[state.first][state.second];
        let second = self.second_bounds[state.second][state.first];
        first.max(second)
    }
}

/// A pair of sentences aligned closely enough to be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub first: usize,
    pub second: usize,
    pub distance: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Identical,
    Similar,
    PartialOverlap,
    LittleOverlap,
    NoOverlap,
}

impl Verdict {
    pub fn from_similarity(percentage: f64) -> Self {
        if percentage >= 95.0 {
            Verdict::Identical
        } else if percentage >= 60.0 {
            Verdict::Similar
        } else if percentage >= 30.0 {
            Verdict::PartialOverlap
        } else if percentage >= 10.0 {
            Verdict::LittleOverlap
        } else {
            Verdict::NoOverlap
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Verdict::Identical => "Identical Documents",
            Verdict::Similar => "Similar Documents",
            Verdict::PartialOverlap => "Partial Overlap",
            Verdict::LittleOverlap => "Little Overlap",
            Verdict::NoOverlap => "No Overlap",
        };
        write!(f, "{}", text)
    }
}

/// What an alignment says about the two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Findings {
    pub cost: usize,
    pub matches: Vec<Match>,

    /// Percentage of the longer document covered by aligned sentences,
    /// discounted by their edit distance.
    pub similarity: f64,
}

impl Findings {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_similarity(self.similarity)
    }
}

/// Split input into the two documents around a line holding only `---`.
fn split_documents(text: &str) -> Result<(String, String), PuzzleError> {
    let mut documents = (String::new(), String::new());
    let mut separated = false;

    for line in text.lines() {
        if !separated && line.trim() == "---" {
            separated = true;
            continue;
        }
        let document = if separated {
            &mut documents.1
        } else {
            &mut documents.0
        };
        document.push_str(line);
        document.push('\n');
    }

    if separated {
        Ok(documents)
    } else {
        Err(PuzzleError::MissingInput("a '---' line between the two documents"))
    }
}

pub(crate) fn main(input: Box<dyn Read + 'static>, options: &RunOptions) -> Result<(), Error> {
    let text = read_input(input)?;
    let (first, second) = split_documents(&text)?;

    let alignment = Alignment::from_texts(&first, &second);
    info!(
        first = alignment.first().len(),
        second = alignment.second().len(),
        "normalized documents"
    );
    println!(
        "Sentences: {} and {}",
        alignment.first().len(),
        alignment.second().len()
    );

    for strategy in options.strategies(&[Strategy::AStar]) {
        let report = solve(&alignment, alignment.origin(), strategy, options)?;
        let path = match report.path() {
            Some(path) => path,
            None => continue,
        };

        let findings = alignment.findings(&path, THRESHOLD);
        println!("Alignment cost: {}", findings.cost);
        for m in &findings.matches {
            println!(
                "Sentence {} ~ sentence {} (distance {}): {:?} / {:?}",
                m.first,
                m.second,
                m.distance,
                alignment.first()[m.first].iter().join(" "),
                alignment.second()[m.second].iter().join(" ")
            );
        }
        println!("Similarity: {:.1}%", findings.similarity);
        println!("{}", findings.verdict());
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use searcher::{astar, bfs, dijkstra, validate};

    const FIXTURE: &str = include_str!("../../puzzles/plagiarism/input.txt");

    fn words(s: &str) -> Sentence {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn fixture() -> Alignment {
        let (first, second) = split_documents(FIXTURE).unwrap();
        Alignment::from_texts(&first, &second)
    }

    /// Cheapest alignment by filling in every cell of the edit table.
    fn exhaustive(alignment: &Alignment) -> usize {
        let (a, b) = (alignment.first(), alignment.second());
        let mut table = vec![vec![0; b.len() + 1]; a.len() + 1];
        for i in 0..=a.len() {
            for j in 0..=b.len() {
                table[i][j] = match (i, j) {
                    (0, 0) => 0,
                    (0, _) => table[0][j - 1] + b[j - 1].len(),
                    (_, 0) => table[i - 1][0] + a[i - 1].len(),
                    _ => (table[i - 1][j - 1] + levenshtein(&a[i - 1], &b[j - 1]))
                        .min(table[i - 1][j] + a[i - 1].len())
                        .min(table[i][j - 1] + b[j - 1].len()),
                };
            }
        }
        table[a.len()][b.len()]
    }

    #[test]
    fn edit_distance() {
        assert_eq!(levenshtein(&words("a b c"), &words("a c")), 1);
        assert_eq!(levenshtein(&words("a b c"), &words("")), 3);
        assert_eq!(levenshtein(&words(""), &words("")), 0);
        assert_eq!(levenshtein(&b"kitten"[..], &b"sitting"[..]), 3);
        assert_eq!(levenshtein(&b"flaw"[..], &b"lawn"[..]), 2);
    }

    #[test]
    fn normalization() {
        let sentences = normalize("Hello, World! This is it.\nAnother  line\n\n...");
        assert_eq!(
            sentences,
            vec![
                words("hello world"),
                words("this is it"),
                words("another line")
            ]
        );
        assert!(normalize(" . ! ").is_empty());
    }

    #[test]
    fn separator() {
        let (a, b) = split_documents("one.\n---\ntwo.\n").unwrap();
        assert_eq!(a, "one.\n");
        assert_eq!(b, "two.\n");

        assert!(matches!(
            split_documents("one.\ntwo.\n"),
            Err(PuzzleError::MissingInput(_))
        ));
    }

    #[test]
    fn identical() {
        let text = "The first sentence. And a second one!";
        let alignment = Alignment::from_texts(text, text);

        let path = astar(&alignment, alignment.origin()).unwrap().path().unwrap();
        let findings = alignment.findings(&path, THRESHOLD);
        assert_eq!(findings.cost, 0);
        assert_eq!(findings.matches.len(), 2);
        assert_eq!(findings.verdict(), Verdict::Identical);
    }

    #[test]
    fn one_word_changed() {
        let alignment = Alignment::from_texts(
            "The quick brown fox jumps over the lazy dog. It was a sunny day.",
            "The quick brown fox leaped over the lazy dog. It was a sunny day.",
        );

        let path = astar(&alignment, alignment.origin()).unwrap().path().unwrap();
        let findings = alignment.findings(&path, THRESHOLD);
        assert_eq!(findings.cost, 1);
        assert_eq!(
            findings.matches,
            vec![
                Match {
                    first: 0,
                    second: 0,
                    distance: 1
                },
                Match {
                    first: 1,
                    second: 1,
                    distance: 0
                }
            ]
        );
        assert_eq!(findings.verdict(), Verdict::Similar);
    }

    #[test]
    fn unrelated() {
        let alignment = Alignment::from_texts(
            "The cat sat on the mat.",
            "Quantum flux capacitors hum loudly.",
        );

        let path = astar(&alignment, alignment.origin()).unwrap().path().unwrap();
        let findings = alignment.findings(&path, THRESHOLD);
        assert_eq!(findings.cost, 6);
        assert!(findings.matches.is_empty());
        assert_eq!(findings.verdict(), Verdict::NoOverlap);
    }

    #[test]
    fn empty_documents() {
        let alignment = Alignment::from_texts("", "Only the second document has words.");
        let path = astar(&alignment, alignment.origin()).unwrap().path().unwrap();
        assert_eq!(path.cost(), 6);
        assert_eq!(path.len(), 1);

        let alignment = Alignment::from_texts("", "");
        let report = astar(&alignment, alignment.origin()).unwrap();
        assert!(report.path().unwrap().is_empty());
        assert_eq!(report.explored(), 0);
    }

    #[test]
    fn verdicts() {
        assert_eq!(Verdict::from_similarity(100.0), Verdict::Identical);
        assert_eq!(Verdict::from_similarity(95.0), Verdict::Identical);
        assert_eq!(Verdict::from_similarity(60.0), Verdict::Similar);
        assert_eq!(Verdict::from_similarity(59.9), Verdict::PartialOverlap);
        assert_eq!(Verdict::from_similarity(10.0), Verdict::LittleOverlap);
        assert_eq!(Verdict::from_similarity(9.9), Verdict::NoOverlap);
        assert_eq!(Verdict::Similar.to_string(), "Similar Documents");
    }

    #[test]
    fn informed_matches_uniform_cost() {
        let alignment = fixture();
        assert!(!alignment.first().is_empty());
        assert!(!alignment.second().is_empty());

        let informed = astar(&alignment, alignment.origin()).unwrap();
        let uniform = dijkstra::run(&alignment, alignment.origin()).unwrap();

        let path = informed.path().unwrap();
        validate(&alignment, &path).unwrap();
        assert_eq!(path.cost(), uniform.path().unwrap().cost());
        assert_eq!(path.cost(), exhaustive(&alignment));
        assert!(informed.explored() <= uniform.explored());
    }

    #[test]
    fn heuristic_never_overestimates() {
        let alignment = fixture();
        let path = astar(&alignment, alignment.origin()).unwrap().path().unwrap();

        for step in path.steps() {
            let remaining = path.cost() - step.cost();
            assert!(alignment.heuristic(step.state()) <= remaining);
        }
        assert_eq!(alignment.heuristic(path.destination()), 0);
    }

    #[test]
    fn breadth_first_counts_moves() {
        // Breadth first ignores costs, so it finds the fewest edits instead.
        let alignment = fixture();
        let path = bfs(&alignment, alignment.origin()).unwrap().path().unwrap();
        let fewest = alignment.first().len().max(alignment.second().len());
        assert_eq!(path.len(), fewest);
        validate(&alignment, &path).unwrap();
    }

    #[test]
    fn rejects_out_of_range() {
        let alignment = Alignment::from_texts("One.", "Two.");
        assert!(matches!(
            astar(&alignment, Cursor::new(2, 0)),
            Err(SearchError::InvalidState(_))
        ));
    }

    #[test]
    fn main_runs_the_default_input() {
        main(Box::new(FIXTURE.as_bytes()), &RunOptions::default()).unwrap();

        let options = RunOptions {
            strategy: Some(Strategy::UniformCost),
            ..RunOptions::default()
        };
        main(Box::new(FIXTURE.as_bytes()), &options).unwrap();
    }

    #[test]
    fn main_rejects_a_single_document() {
        let single = FIXTURE.replace("---", "");
        let err = main(Box::new(std::io::Cursor::new(single)), &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PuzzleError>(),
            Some(PuzzleError::MissingInput(_))
        ));
    }
}
