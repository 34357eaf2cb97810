use chrono::Utc;
use codestash_core::search::code_preview;
use codestash_core::{format_time_ago, Snippet, Stats};

pub const SEPARATOR: &str = "─────────────────────────────────────";
const HEAVY_SEPARATOR: &str = "═══════════════════════════════════════";
const SECTION_SEPARATOR: &str = "───────────────────────────────────────";

pub fn print_code_block(code: &str) {
    println!("{}", SEPARATOR);
    println!("{}", code);
    println!("{}", SEPARATOR);
}

fn print_indented_code(code: &str) {
    println!("   Code:");
    println!("   {}", SEPARATOR);
    for line in code.split('\n') {
        println!("   {}", line);
    }
    println!("   {}", SEPARATOR);
}

/// Title, description and code, as shown by `print` and plain `use`.
pub fn print_snippet(snippet: &Snippet) {
    println!("📄 {}", snippet.title);
    println!("📝 {}", snippet.description);
    if snippet.executable {
        println!("🚀 This snippet is executable");
    }
    print_code_block(&snippet.code);
}

fn print_summary(snippet: &Snippet) {
    println!("🔹 ID: {}", snippet.id);
    println!("   Title: {}", snippet.title);
    println!("   Language: {}", snippet.language);
    println!("   Tags: {}", snippet.tags_joined());
    println!("   Description: {}", snippet.description);
}

pub fn print_list_entry(snippet: &Snippet, expanded: bool) {
    print_summary(snippet);
    println!("   Executable: {}", snippet.executable);
    println!("   Used: {} times", snippet.usage_count);

    if expanded {
        print_indented_code(&snippet.code);
        println!("   last used: {}", snippet.last_used);
        println!("   created at: {}", snippet.created_at);
    }
    println!();
}

pub fn print_search_entry(snippet: &Snippet, query: &str, expanded: bool) {
    print_summary(snippet);
    println!("   Used: {} times", snippet.usage_count);
    if snippet.executable {
        println!("   🚀 Executable: Yes");
    } else {
        println!("   📄 Executable: No");
    }

    if expanded {
        print_indented_code(&snippet.code);
    } else if snippet.code.to_lowercase().contains(&query.to_lowercase()) {
        println!("   Preview: {}", code_preview(&snippet.code, query));
    }
    println!();
}

fn print_section(title: &str) {
    println!("\n{}", title);
    println!("{}", SECTION_SEPARATOR);
}

pub fn print_stats(stats: &Stats<'_>, detailed: bool) {
    let now = Utc::now();

    println!("📊 CodeStash Statistics");
    println!("{}\n", HEAVY_SEPARATOR);

    println!("📚 Total Snippets: {}", stats.total);
    println!("🚀 Executable Snippets: {}", stats.executable);
    println!("📋 Non-executable Snippets: {}", stats.non_executable());
    println!("📈 Total Usage: {} times", stats.total_usage);
    if stats.total > 0 {
        println!(
            "📊 Average Usage: {:.1} times per snippet",
            stats.average_usage()
        );
    }

    print_section("🏆 Top 5 Most Used Snippets:");
    for (i, snippet) in stats.most_used.iter().enumerate() {
        let last_used = format_time_ago(&snippet.last_used, now)
            .map(|ago| format!(" (last used: {})", ago))
            .unwrap_or_default();
        println!(
            "{}. {} — used {} times{}",
            i + 1,
            snippet.title,
            snippet.usage_count,
            last_used
        );
    }

    print_section("💻 Top Languages:");
    for (i, (language, count)) in stats.languages.iter().take(5).enumerate() {
        println!(
            "{}. {} — {} snippets ({:.1}%)",
            i + 1,
            language,
            count,
            stats.language_share(*count)
        );
    }

    print_section("🏷️  Top Tags:");
    for (i, (tag, count)) in stats.tags.iter().take(5).enumerate() {
        println!("{}. {} — {} snippets", i + 1, tag, count);
    }

    print_section("🆕 Recently Created:");
    for snippet in &stats.recently_created {
        match format_time_ago(&snippet.created_at, now) {
            Some(ago) => println!("• {} — created {}", snippet.title, ago),
            None => println!("• {} — recently created", snippet.title),
        }
    }

    print_section("🕒 Recently Used:");
    if stats.recently_used.is_empty() {
        println!("• No snippets used yet");
    }
    for snippet in &stats.recently_used {
        match format_time_ago(&snippet.last_used, now) {
            Some(ago) => println!("• {} — used {}", snippet.title, ago),
            None => println!("• {} — recently used", snippet.title),
        }
    }

    if detailed {
        print_detailed(stats);
    }
}

fn print_detailed(stats: &Stats<'_>) {
    print_section("📋 Detailed Statistics:");

    if !stats.unused.is_empty() {
        println!("😴 Unused Snippets ({}):", stats.unused.len());
        for snippet in &stats.unused {
            println!("   • {} ({})", snippet.title, snippet.language);
        }
        println!();
    }

    println!("💻 All Languages:");
    for (language, count) in &stats.languages {
        println!("   • {}: {} snippets", language, count);
    }
    println!();

    if !stats.tags.is_empty() {
        println!("🏷️  All Tags:");
        for (tag, count) in &stats.tags {
            println!("   • {}: {} snippets", tag, count);
        }
    }
}
