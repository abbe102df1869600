use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::github::RepoId;
use crate::index::PrIndex;

/// Scan every record and every entry of its files for a case-sensitive
/// contiguous substring match, and return one "files changed" link per
/// matching entry — record order first, then file order within a record.
///
/// No deduplication: a PR whose files contain K matching entries contributes
/// K identical links.
pub fn matching_links(index: &PrIndex, repo: &RepoId, fragment: &str) -> Vec<String> {
    let mut links = Vec::new();
    for record in index {
        for file in &record.files {
            if file.contains(fragment) {
                links.push(repo.files_url(record.number));
            }
        }
    }
    links
}

/// Interactive lookup over stdin/stdout. Prompts, reads one fragment per
/// line, and prints the matching links. Returns cleanly when input is
/// exhausted.
pub fn run(index: &PrIndex, repo: &RepoId) -> io::Result<()> {
    let stdin = io::stdin();
    run_loop(index, repo, stdin.lock(), io::stdout())
}

fn run_loop<R: BufRead, W: Write>(
    index: &PrIndex,
    repo: &RepoId,
    mut input: R,
    mut output: W,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "input file name: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input exhausted, leaving lookup loop");
            return Ok(());
        }

        // Only the line terminator is stripped; the fragment is otherwise raw.
        let fragment = line.strip_suffix('\n').unwrap_or(&line);
        let fragment = fragment.strip_suffix('\r').unwrap_or(fragment);

        let links = matching_links(index, repo, fragment);
        debug!(fragment, matches = links.len(), "lookup");
        for link in links {
            writeln!(output, "{}", link)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PrRecord;
    use std::io::Cursor;

    fn repo() -> RepoId {
        RepoId::parse("openshift/console").unwrap()
    }

    fn record(number: u64, files: &[&str]) -> PrRecord {
        PrRecord {
            number,
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Run the loop over scripted input and return only the emitted links.
    /// The prompt carries no trailing newline, so the first link of a batch
    /// shares its line with the prompt text.
    fn lookup_lines(index: &PrIndex, input: &str) -> Vec<String> {
        let mut output = Vec::new();
        run_loop(index, &repo(), Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .filter_map(|l| l.find("https://").map(|at| l[at..].to_string()))
            .collect()
    }

    #[test]
    fn test_one_link_per_matching_file() {
        let index = vec![record(42, &["src/app.ts", "src/app.test.ts"])];
        let links = matching_links(&index, &repo(), "app.ts");
        assert_eq!(
            links,
            vec![
                "https://github.com/openshift/console/pull/42/files",
                "https://github.com/openshift/console/pull/42/files",
            ]
        );
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let index = vec![record(42, &["src/App.ts"])];
        assert!(matching_links(&index, &repo(), "app.ts").is_empty());
        assert_eq!(matching_links(&index, &repo(), "App.ts").len(), 1);
    }

    #[test]
    fn test_match_at_any_position() {
        let index = vec![record(3, &["packages/console-shared/src/utils/index.ts"])];
        assert_eq!(matching_links(&index, &repo(), "console-shared").len(), 1);
        assert_eq!(matching_links(&index, &repo(), "packages/").len(), 1);
        assert_eq!(matching_links(&index, &repo(), "index.ts").len(), 1);
    }

    #[test]
    fn test_links_follow_record_then_file_order() {
        let index = vec![
            record(9, &["b/lib.rs", "a/lib.rs"]),
            record(4, &["c/lib.rs"]),
        ];
        let links = matching_links(&index, &repo(), "lib.rs");
        assert_eq!(
            links,
            vec![
                "https://github.com/openshift/console/pull/9/files",
                "https://github.com/openshift/console/pull/9/files",
                "https://github.com/openshift/console/pull/4/files",
            ]
        );
    }

    #[test]
    fn test_duplicate_file_entries_both_match() {
        let index = vec![record(1, &["a.rs", "a.rs"])];
        assert_eq!(matching_links(&index, &repo(), "a.rs").len(), 2);
    }

    #[test]
    fn test_empty_fragment_matches_every_entry() {
        let index = vec![record(1, &["a.rs", "b.rs"])];
        assert_eq!(matching_links(&index, &repo(), "").len(), 2);
    }

    #[test]
    fn test_loop_prints_scenario_links() {
        let index = vec![record(42, &["src/app.ts", "src/app.test.ts"])];
        let lines = lookup_lines(&index, "app.ts\n");
        assert_eq!(
            lines,
            vec![
                "https://github.com/openshift/console/pull/42/files",
                "https://github.com/openshift/console/pull/42/files",
            ]
        );
    }

    #[test]
    fn test_loop_repeats_matches_when_fragment_reentered() {
        let index = vec![record(42, &["src/app.ts"])];
        let lines = lookup_lines(&index, "app.ts\napp.ts\n");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_loop_on_empty_index_keeps_prompting() {
        let mut output = Vec::new();
        run_loop(&vec![], &repo(), Cursor::new("a\nb\nc\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(!text.contains("https://"));
        // One prompt per input line plus the final one that hits end of input.
        assert_eq!(text.matches("input file name: ").count(), 4);
    }

    #[test]
    fn test_loop_ends_cleanly_on_end_of_input() {
        let index = vec![record(1, &["a.rs"])];
        let mut output = Vec::new();
        assert!(run_loop(&index, &repo(), Cursor::new(""), &mut output).is_ok());
    }

    #[test]
    fn test_loop_strips_only_the_line_terminator() {
        // An inner space is part of the fragment and prevents the match.
        let index = vec![record(1, &["a.rs"])];
        assert!(lookup_lines(&index, "a .rs\n").is_empty());
        // CRLF input matches the same as LF input.
        assert_eq!(lookup_lines(&index, "a.rs\r\n").len(), 1);
    }
}
