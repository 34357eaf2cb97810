use crate::cli::Commands;
use crate::display::{
    print_list_entry, print_search_entry, print_snippet, print_stats, SEPARATOR,
};
use crate::prompt::Prompter;
use codestash_core::search::{filter_snippets, search};
use codestash_core::{
    check_gate, parse_tags, parse_yes_no, resolve_index, resolve_mut, run_snippet,
    set_clipboard_text, CodestashError, EditField, GateDecision, Result, Snippet, SnippetStore,
    Stats,
};
use std::io::BufRead;

const EMPTY_STORE: &str = "📭 No snippets found. Use 'codestash add' to create your first snippet!";

/// Print a failed command's error, with a hint where one helps.
pub fn report_error(err: &CodestashError) {
    eprintln!("❌ {}", err);
    if let CodestashError::NotExecutable(_) = err {
        eprintln!(
            "💡 Use --force to execute anyway, or mark it executable with 'codestash edit --field executable'"
        );
    }
}

pub fn handle_subcommand<R: BufRead>(
    store: &SnippetStore,
    command: Commands,
    prompter: &mut Prompter<R>,
) -> Result<()> {
    match command {
        Commands::Add => handle_add(store, prompter),
        Commands::Edit { token, field } => handle_edit(store, &token, field.as_deref(), prompter),
        Commands::List {
            language,
            tag,
            expanded,
        } => handle_list(store, language.as_deref(), tag.as_deref(), expanded),
        Commands::Use {
            token,
            copy,
            execute,
            force,
        } => {
            if copy {
                handle_copy(store, &token)
            } else if execute {
                handle_exec(store, &token, force)
            } else {
                handle_print(store, &token)
            }
        }
        Commands::Delete { token, force } => handle_delete(store, &token, force, prompter),
        Commands::Search {
            query,
            expanded,
            executable,
        } => handle_search(store, &query, expanded, executable),
        Commands::Exec { token, force } => handle_exec(store, &token, force),
        Commands::Copy { token } => handle_copy(store, &token),
        Commands::Print { token } => handle_print(store, &token),
        Commands::Stats { detailed } => handle_stats(store, detailed),
    }
}

/// Count a successful use. Failing to persist the count does not undo the
/// action, so it is only reported.
fn record_use(store: &SnippetStore, snippets: &mut [Snippet], index: usize) {
    snippets[index].record_use();
    if let Err(e) = store.save(snippets) {
        log::debug!("usage stats for '{}' not saved: {:?}", snippets[index].id, e);
        println!("⚠️  Failed to update usage stats: {}", e);
    }
}

fn handle_add<R: BufRead>(store: &SnippetStore, prompter: &mut Prompter<R>) -> Result<()> {
    let answers = prompter.read_new_snippet()?;
    let executable = parse_yes_no(&answers.executable).unwrap_or(false);

    let mut snippets = store.load()?;
    let snippet = Snippet::new_unique(
        &snippets,
        answers.title,
        answers.code,
        answers.description,
        answers.language,
        parse_tags(&answers.tags),
        executable,
    );
    let id = snippet.id.clone();
    snippets.push(snippet);
    store.save(&snippets)?;

    println!("✅ Snippet added successfully! (id: {})", id);
    if executable {
        println!("🚀 This snippet is marked as executable and can be run with 'codestash exec'");
    }
    Ok(())
}

fn handle_edit<R: BufRead>(
    store: &SnippetStore,
    token: &str,
    field: Option<&str>,
    prompter: &mut Prompter<R>,
) -> Result<()> {
    // Reject a bad field name before asking anything.
    let field = field.map(|name| name.parse::<EditField>()).transpose()?;

    let mut snippets = store.load()?;
    let snippet = resolve_mut(&mut snippets, token)?;

    match field {
        Some(field) => {
            let value = prompter.read_field_value(snippet, field)?;
            snippet.apply_field_edit(field, &value)?;
        }
        None => {
            let edit = prompter.read_snippet_edit(snippet)?;
            snippet.apply_interactive_edit(&edit);
        }
    }

    let title = snippet.title.clone();
    store.save(&snippets)?;
    println!("✅ Snippet '{}' updated successfully!", title);
    Ok(())
}

fn handle_list(
    store: &SnippetStore,
    language: Option<&str>,
    tag: Option<&str>,
    expanded: bool,
) -> Result<()> {
    let snippets = store.load()?;
    if snippets.is_empty() {
        println!("{}", EMPTY_STORE);
        return Ok(());
    }

    let filtered = filter_snippets(&snippets, language, tag);
    if filtered.is_empty() {
        println!("📭 No snippets match your filters.");
        return Ok(());
    }

    println!("📚 Found {} snippet(s):\n", filtered.len());
    for snippet in filtered {
        print_list_entry(snippet, expanded);
    }
    Ok(())
}

fn handle_print(store: &SnippetStore, token: &str) -> Result<()> {
    let mut snippets = store.load()?;
    let index = resolve_index(&snippets, token)?;

    print_snippet(&snippets[index]);
    record_use(store, &mut snippets, index);
    Ok(())
}

fn handle_copy(store: &SnippetStore, token: &str) -> Result<()> {
    let mut snippets = store.load()?;
    let index = resolve_index(&snippets, token)?;

    set_clipboard_text(&snippets[index].code)?;
    println!("📋 Copied '{}' to clipboard", snippets[index].title);
    record_use(store, &mut snippets, index);
    Ok(())
}

fn handle_exec(store: &SnippetStore, token: &str, force: bool) -> Result<()> {
    let mut snippets = store.load()?;
    let index = resolve_index(&snippets, token)?;
    let snippet = &snippets[index];

    if check_gate(snippet, force)? == GateDecision::Forced {
        println!(
            "⚠️  Forcing execution of non-executable snippet '{}'",
            snippet.title
        );
    }

    println!("🚀 Executing '{}'...", snippet.title);
    println!("{}", SEPARATOR);
    run_snippet(snippet)?;

    record_use(store, &mut snippets, index);
    Ok(())
}

fn handle_delete<R: BufRead>(
    store: &SnippetStore,
    token: &str,
    force: bool,
    prompter: &mut Prompter<R>,
) -> Result<()> {
    let mut snippets = store.load()?;
    let index = resolve_index(&snippets, token)?;
    let title = snippets[index].title.clone();

    if !force
        && !prompter.confirm(&format!(
            "⚠️  Are you sure you want to delete '{}'? [y/N]: ",
            title
        ))?
    {
        println!("❌ Deletion cancelled");
        return Ok(());
    }

    snippets.remove(index);
    store.save(&snippets)?;
    println!("✅ Deleted snippet '{}'", title);
    Ok(())
}

fn handle_search(
    store: &SnippetStore,
    query: &str,
    expanded: bool,
    executable_only: bool,
) -> Result<()> {
    let snippets = store.load()?;
    let matches = search(&snippets, query, executable_only);

    if matches.is_empty() {
        println!("🔍 No snippets found matching '{}'", query);
        return Ok(());
    }

    println!(
        "🔍 Found {} snippet(s) matching '{}':\n",
        matches.len(),
        query
    );
    for snippet in matches {
        print_search_entry(snippet, query, expanded);
    }
    Ok(())
}

fn handle_stats(store: &SnippetStore, detailed: bool) -> Result<()> {
    let snippets = store.load()?;
    if snippets.is_empty() {
        println!("{}", EMPTY_STORE);
        return Ok(());
    }

    print_stats(&Stats::compute(&snippets), detailed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codestash_core::{resolve, StoreConfig};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn find_snippet(store: &SnippetStore, token: &str) -> Result<Snippet> {
        let snippets = store.load()?;
        resolve(&snippets, token).cloned()
    }

    fn store(dir: &TempDir) -> SnippetStore {
        SnippetStore::new(StoreConfig::at(dir.path().join("snippets.json")))
    }

    fn input(text: &str) -> Prompter<Cursor<Vec<u8>>> {
        Prompter::new(Cursor::new(text.as_bytes().to_vec()))
    }

    fn run(store: &SnippetStore, command: Commands, text: &str) -> Result<()> {
        handle_subcommand(store, command, &mut input(text))
    }

    fn add(store: &SnippetStore, title: &str, language: &str, executable: &str, code: &str) {
        let answers = format!("{}\ndesc\n{}\nt1, t2\n{}\n{}\nEOF\n", title, language, executable, code);
        run(store, Commands::Add, &answers).unwrap();
    }

    #[test]
    fn add_then_print_counts_a_use() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Greeting", "python", "n", "print('hi')");

        let added = find_snippet(&store, "greeting").unwrap();
        assert_eq!(added.tags, vec!["t1", "t2"]);
        assert_eq!(added.code, "print('hi')\n");
        assert!(!added.executable);

        run(&store, Commands::Print { token: added.id.clone() }, "").unwrap();
        let used = find_snippet(&store, &added.id).unwrap();
        assert_eq!(used.usage_count, 1);
        assert!(!used.last_used.is_empty());
        assert_eq!(used.created_at, added.created_at);
    }

    #[test]
    fn unknown_token_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let err = run(&store, Commands::Print { token: "zzzz".to_string() }, "").unwrap_err();
        assert!(matches!(err, CodestashError::NotFound(_)));
    }

    #[test]
    fn edit_single_field() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Tagged", "go", "n", "fmt.Println()");

        let command = Commands::Edit {
            token: "tagged".to_string(),
            field: Some("tags".to_string()),
        };
        run(&store, command, "x, y ,z\n").unwrap();
        assert_eq!(find_snippet(&store, "Tagged").unwrap().tags, vec!["x", "y", "z"]);
    }

    #[test]
    fn edit_rejects_empty_title_and_unknown_field() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Keep", "go", "n", "x");

        let empty_title = Commands::Edit {
            token: "Keep".to_string(),
            field: Some("title".to_string()),
        };
        assert!(matches!(
            run(&store, empty_title, "\n"),
            Err(CodestashError::Validation(_))
        ));

        let bad_field = Commands::Edit {
            token: "Keep".to_string(),
            field: Some("owner".to_string()),
        };
        assert!(matches!(
            run(&store, bad_field, ""),
            Err(CodestashError::UnknownField { .. })
        ));
        assert!(find_snippet(&store, "keep").is_ok());
    }

    #[test]
    fn interactive_edit_keeps_blank_answers() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Whole", "go", "n", "x");

        let command = Commands::Edit {
            token: "whole".to_string(),
            field: None,
        };
        run(&store, command, "\nnew desc\n\n\ny\ny\nnew code\nEOF\n").unwrap();

        let edited = find_snippet(&store, "Whole").unwrap();
        assert_eq!(edited.description, "new desc");
        assert_eq!(edited.language, "go");
        assert!(edited.executable);
        assert_eq!(edited.code, "new code\n");
    }

    #[test]
    fn non_executable_snippet_is_refused_without_force() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Py", "python", "n", "print(1)");

        let err = run(
            &store,
            Commands::Exec {
                token: "py".to_string(),
                force: false,
            },
            "",
        )
        .unwrap_err();
        assert!(matches!(err, CodestashError::NotExecutable(_)));
        assert_eq!(find_snippet(&store, "py").unwrap().usage_count, 0);
    }

    #[cfg(unix)]
    #[test]
    fn shell_snippet_executes_and_counts() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Ok", "bash", "n", "exit 0");

        let command = Commands::Use {
            token: "ok".to_string(),
            copy: false,
            execute: true,
            force: false,
        };
        run(&store, command, "").unwrap();
        assert_eq!(find_snippet(&store, "ok").unwrap().usage_count, 1);
    }

    #[cfg(unix)]
    #[test]
    fn failed_execution_does_not_count() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Fails", "sh", "y", "exit 4");

        let err = run(
            &store,
            Commands::Exec {
                token: "fails".to_string(),
                force: false,
            },
            "",
        )
        .unwrap_err();
        assert!(matches!(err, CodestashError::ExecutionFailed(_)));
        assert_eq!(find_snippet(&store, "fails").unwrap().usage_count, 0);
    }

    #[cfg(unix)]
    #[test]
    fn forced_execution_runs_non_executable_snippet() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Notes", "text", "n", "exit 0");

        run(
            &store,
            Commands::Exec {
                token: "notes".to_string(),
                force: true,
            },
            "",
        )
        .unwrap();
        assert_eq!(find_snippet(&store, "notes").unwrap().usage_count, 1);
    }

    #[test]
    fn unsaved_usage_stats_are_not_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let broken = SnippetStore::new(StoreConfig::at(blocker.join("snippets.json")));
        assert!(broken.save(&[]).is_err());

        let mut snippets = vec![Snippet::new(
            "Kept".to_string(),
            "echo kept".to_string(),
            String::new(),
            "bash".to_string(),
            vec![],
            true,
        )];
        record_use(&broken, &mut snippets, 0);
        assert_eq!(snippets[0].usage_count, 1);
        assert!(!blocker.join("snippets.json").exists());
    }

    #[test]
    fn delete_needs_confirmation_unless_forced() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add(&store, "Gone", "go", "n", "x");

        let delete = |force| Commands::Delete {
            token: "gone".to_string(),
            force,
        };
        run(&store, delete(false), "n\n").unwrap();
        assert!(find_snippet(&store, "gone").is_ok());

        run(&store, delete(true), "").unwrap();
        assert!(matches!(
            find_snippet(&store, "gone"),
            Err(CodestashError::NotFound(_))
        ));
    }

    #[test]
    fn read_only_commands_work_on_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        run(
            &store,
            Commands::List {
                language: None,
                tag: None,
                expanded: true,
            },
            "",
        )
        .unwrap();
        run(&store, Commands::Stats { detailed: true }, "").unwrap();
        run(
            &store,
            Commands::Search {
                query: "x".to_string(),
                expanded: false,
                executable: false,
            },
            "",
        )
        .unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_store_surfaces() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            run(&store, Commands::Stats { detailed: false }, ""),
            Err(CodestashError::CorruptStore { .. })
        ));
    }
}
