//! Result presentation.
//!
//! Projects a [`QueryOutcome`] into ranked display records and renders them as
//! terminal text. Rank follows the order the service returned; nothing is re-sorted.

use std::fmt;

use crate::models::SearchResult;
use crate::query::QueryOutcome;
use crate::tier::ScoreTier;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_DIM: &str = "\x1b[2m";

/// Characters of the chunk id shown in the metadata line.
const CHUNK_ID_PREFIX: usize = 8;

/// One ranked, annotated result.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    /// 1-based position in the result list
    pub rank: usize,
    pub result: SearchResult,
    pub tier: ScoreTier,
}

impl DisplayRecord {
    pub fn color(&self) -> &'static str {
        self.tier.color()
    }

    /// Score as a percentage badge, e.g. `85.0% match`.
    pub fn score_label(&self) -> String {
        format!("{:.1}% match", self.result.similarity_score * 100.0)
    }

    pub fn short_chunk_id(&self) -> String {
        let prefix: String = self.result.chunk_id.chars().take(CHUNK_ID_PREFIX).collect();
        format!("{}...", prefix)
    }
}

/// What the result area should show for an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// Nothing submitted yet
    Idle,
    Loading,
    Failed {
        message: String,
    },
    /// A query was submitted and matched nothing
    NoResults {
        query: String,
    },
    Results {
        query: String,
        records: Vec<DisplayRecord>,
    },
}

impl ResultView {
    pub fn render(&self, color: bool) -> Render<'_> {
        Render { view: self, color }
    }
}

/// Rank results in the order given.
pub fn display_records(results: &[SearchResult]) -> Vec<DisplayRecord> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| DisplayRecord {
            rank: index + 1,
            result: result.clone(),
            tier: ScoreTier::from_score(result.similarity_score),
        })
        .collect()
}

/// Project an outcome into a view.
pub fn present(outcome: &QueryOutcome) -> ResultView {
    match outcome {
        QueryOutcome::Idle => ResultView::Idle,
        QueryOutcome::Loading => ResultView::Loading,
        QueryOutcome::Error { message } => ResultView::Failed {
            message: message.clone(),
        },
        QueryOutcome::Success { query, results } if results.is_empty() => ResultView::NoResults {
            query: query.clone(),
        },
        QueryOutcome::Success { query, results } => ResultView::Results {
            query: query.clone(),
            records: display_records(results),
        },
    }
}

/// Terminal rendering of a [`ResultView`].
pub struct Render<'a> {
    view: &'a ResultView,
    color: bool,
}

impl Render<'_> {
    fn paint(&self, f: &mut fmt::Formatter<'_>, style: &str, text: &str) -> fmt::Result {
        if self.color {
            write!(f, "{}{}{}", style, text, ANSI_RESET)
        } else {
            f.write_str(text)
        }
    }

    fn record(&self, f: &mut fmt::Formatter<'_>, record: &DisplayRecord) -> fmt::Result {
        self.paint(f, ANSI_BOLD, &format!("#{}", record.rank))?;
        f.write_str("  ")?;
        self.paint(f, record.tier.ansi(), &format!("[{}]", record.score_label()))?;
        writeln!(f)?;
        writeln!(f, "{}", record.result.text.trim())?;
        self.paint(
            f,
            ANSI_DIM,
            &format!(
                "Chunk ID: {}  Index: {}",
                record.short_chunk_id(),
                record.result.chunk_index
            ),
        )?;
        writeln!(f)
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.view {
            ResultView::Idle => Ok(()),
            ResultView::Loading => writeln!(f, "Searching..."),
            ResultView::Failed { message } => {
                self.paint(f, ANSI_RED, message)?;
                writeln!(f)
            }
            ResultView::NoResults { query } => writeln!(f, "No results found for \"{}\"", query),
            ResultView::Results { query, records } => {
                let noun = if records.len() == 1 { "result" } else { "results" };
                writeln!(f, "Found {} {} for \"{}\"", records.len(), noun, query)?;
                for record in records {
                    writeln!(f)?;
                    self.record(f, record)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn result(chunk_id: &str, chunk_index: u32, score: f64) -> SearchResult {
        SearchResult {
            chunk_id: chunk_id.to_string(),
            chunk_index,
            text: format!("text of {}", chunk_id),
            similarity_score: score,
            document_id: None,
        }
    }

    fn success(query: &str, results: Vec<SearchResult>) -> QueryOutcome {
        QueryOutcome::Success {
            query: query.to_string(),
            results,
        }
    }

    #[test]
    fn test_ranks_and_tiers_follow_input_order() {
        let outcome = success(
            "machine learning",
            vec![result("3f2a9c1e-aaaa", 0, 0.85), result("9b1d77aa-bbbb", 4, 0.72)],
        );

        let ResultView::Results { query, records } = present(&outcome) else {
            panic!("expected results view");
        };
        assert_eq!(query, "machine learning");
        assert_eq!(records.len(), 2);
        assert_eq!((records[0].rank, records[0].tier), (1, ScoreTier::High));
        assert_eq!((records[1].rank, records[1].tier), (2, ScoreTier::Medium));
        assert_eq!(records[0].color(), "#22c55e");
    }

    #[test]
    fn test_no_resort_by_score() {
        let records = display_records(&[result("low", 0, 0.5), result("high", 1, 0.95)]);
        assert_eq!(records[0].result.chunk_id, "low");
        assert_eq!(records[0].rank, 1);
        assert_eq!(records[1].tier, ScoreTier::High);
    }

    #[test]
    fn test_three_distinct_empty_states() {
        assert_eq!(present(&QueryOutcome::Idle), ResultView::Idle);
        assert_eq!(present(&QueryOutcome::Loading), ResultView::Loading);
        assert_eq!(
            present(&success("foo", vec![])),
            ResultView::NoResults {
                query: "foo".to_string()
            }
        );
    }

    #[test]
    fn test_score_label_and_short_id() {
        let record = &display_records(&[result("3f2a9c1e-77aa-4b", 2, 0.8512)])[0];
        assert_eq!(record.score_label(), "85.1% match");
        assert_eq!(record.short_chunk_id(), "3f2a9c1e...");

        let short = &display_records(&[result("ab", 0, 0.1)])[0];
        assert_eq!(short.short_chunk_id(), "ab...");
    }

    #[test]
    fn test_render_plain_text() {
        let view = present(&success("rust", vec![result("0123456789", 7, 0.72)]));
        let text = view.render(false).to_string();

        assert_eq!(
            text,
            "Found 1 result for \"rust\"\n\n#1  [72.0% match]\ntext of 0123456789\nChunk ID: 01234567...  Index: 7\n"
        );
    }

    #[test]
    fn test_render_states() {
        assert_eq!(ResultView::Idle.render(false).to_string(), "");
        assert_eq!(ResultView::Loading.render(false).to_string(), "Searching...\n");
        assert_eq!(
            present(&success("foo", vec![])).render(false).to_string(),
            "No results found for \"foo\"\n"
        );
        assert_eq!(
            present(&QueryOutcome::Error {
                message: "index not found".to_string()
            })
            .render(false)
            .to_string(),
            "index not found\n"
        );
    }

    #[test]
    fn test_render_color_uses_tier_escape() {
        let view = present(&success("rust", vec![result("abc", 0, 0.65)]));
        let text = view.render(true).to_string();
        assert!(text.contains("\x1b[33m[65.0% match]\x1b[0m"));
    }

    proptest! {
        #[test]
        fn prop_presentation_is_deterministic(
            scores in proptest::collection::vec(0.0f64..=1.0, 0..20),
        ) {
            let results: Vec<SearchResult> = scores
                .iter()
                .enumerate()
                .map(|(i, score)| result(&format!("chunk-{}", i), i as u32, *score))
                .collect();
            let outcome = success("q", results);

            let first = present(&outcome);
            let second = present(&outcome);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.render(false).to_string(), second.render(false).to_string());

            if let ResultView::Results { records, .. } = first {
                for (i, record) in records.iter().enumerate() {
                    prop_assert_eq!(record.rank, i + 1);
                }
            }
        }
    }
}
