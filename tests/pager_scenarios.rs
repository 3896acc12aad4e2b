//! Integration tests for result paging against a scripted engine.

mod common;

use common::{ScriptedEngine, console, result_ranks, transcript};
use synsearch::config::{InvalidNavigationPolicy, PagerConfig};
use synsearch::error::{Result, SynsearchError};
use synsearch::session::{BrowseOutcome, ResultPager};

fn browse(engine: &ScriptedEngine, config: &PagerConfig, input: &str) -> Result<(BrowseOutcome, String)> {
    let mut console = console(input);
    let query = "anything".to_string();
    let outcome = ResultPager::new(engine, config).browse(&query, &mut console)?;
    Ok((outcome, transcript(console)))
}

#[test]
fn test_three_pages_and_out_of_range_jump() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "n\nn\n4\nn\nq\n")?;

    assert_eq!(outcome, BrowseOutcome::Quit);
    assert!(output.starts_with("23 total matching documents\n"));
    assert_eq!(result_ranks(&output), (1..=23).collect::<Vec<_>>());
    assert!(output.contains("No such page"));
    assert!(output.contains("Already on the last page"));
    assert!(output.contains("23. Doc 22"));
    assert_eq!(engine.capacities(), vec![50]);

    Ok(())
}

#[test]
fn test_navigation_prompt_offers_only_enabled_moves() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (_, output) = browse(&engine, &PagerConfig::default(), "n\nn\nq\n")?;

    let prompts: Vec<&str> = output
        .match_indices("Press ")
        .map(|(pos, _)| {
            let rest = &output[pos..];
            &rest[..rest.find("page: ").map_or(rest.len(), |end| end + 5)]
        })
        .collect();
    assert_eq!(
        prompts,
        vec![
            "Press (n)ext page, (q)uit or enter number to jump to a page:",
            "Press (p)revious page, (n)ext page, (q)uit or enter number to jump to a page:",
            "Press (p)revious page, (q)uit or enter number to jump to a page:",
        ]
    );

    Ok(())
}

#[test]
fn test_single_page_never_prompts() -> Result<()> {
    let engine = ScriptedEngine::new(3);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "")?;

    assert_eq!(outcome, BrowseOutcome::SinglePage);
    assert_eq!(result_ranks(&output), vec![1, 2, 3]);
    assert!(!output.contains("Press"));

    Ok(())
}

#[test]
fn test_no_matches() -> Result<()> {
    let engine = ScriptedEngine::new(0);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "")?;

    assert_eq!(outcome, BrowseOutcome::SinglePage);
    assert_eq!(output, "0 total matching documents\n");

    Ok(())
}

#[test]
fn test_collect_more_prompt_before_unmaterialized_page() -> Result<()> {
    let engine = ScriptedEngine::new(120).with_first_cap(30);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "5\nn\n")?;

    assert_eq!(outcome, BrowseOutcome::Declined);
    assert!(output.contains("Only results 1 - 30 of 120 total matching documents collected."));
    assert!(output.contains("Collect more (y/n)? "));
    // Nothing from the requested window is rendered.
    assert_eq!(result_ranks(&output), (1..=10).collect::<Vec<_>>());
    assert_eq!(engine.capacities(), vec![50]);

    Ok(())
}

#[test]
fn test_collect_more_refetches_everything() -> Result<()> {
    let engine = ScriptedEngine::new(120).with_first_cap(30);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "5\ny\nq\n")?;

    assert_eq!(outcome, BrowseOutcome::Quit);
    let mut expected: Vec<usize> = (1..=10).collect();
    expected.extend(41..=50);
    assert_eq!(result_ranks(&output), expected);
    assert_eq!(engine.capacities(), vec![50, 120]);

    Ok(())
}

#[test]
fn test_walking_past_overfetch_asks_once() -> Result<()> {
    let engine = ScriptedEngine::new(60);
    let config = PagerConfig::default();
    let (_, output) = browse(&engine, &config, "6\ny\np\nq\n")?;

    assert_eq!(output.matches("Collect more").count(), 1);
    let mut expected: Vec<usize> = (1..=10).collect();
    expected.extend(51..=60);
    expected.extend(41..=50);
    assert_eq!(result_ranks(&output), expected);
    assert_eq!(engine.capacities(), vec![50, 60]);

    Ok(())
}

#[test]
fn test_jump_and_previous() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (_, output) = browse(&engine, &PagerConfig::default(), "3\np\nq\n")?;

    let mut expected: Vec<usize> = (1..=10).collect();
    expected.extend(21..=23);
    expected.extend(11..=20);
    assert_eq!(result_ranks(&output), expected);

    Ok(())
}

#[test]
fn test_previous_on_first_page_is_reported() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "p\nq\n")?;

    assert_eq!(outcome, BrowseOutcome::Quit);
    assert!(output.contains("Already on the first page"));
    assert_eq!(result_ranks(&output), (1..=10).collect::<Vec<_>>());

    Ok(())
}

#[test]
fn test_invalid_navigation_reprompts_by_default() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (outcome, output) = browse(&engine, &PagerConfig::default(), "x\n0\nq\n")?;

    assert_eq!(outcome, BrowseOutcome::Quit);
    assert_eq!(output.matches("Invalid navigation input").count(), 2);
    assert_eq!(output.matches("Press ").count(), 3);

    Ok(())
}

#[test]
fn test_invalid_navigation_can_quit() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let config = PagerConfig {
        on_invalid_navigation: InvalidNavigationPolicy::Quit,
        ..PagerConfig::default()
    };
    let (outcome, output) = browse(&engine, &config, "x\nn\n")?;

    assert_eq!(outcome, BrowseOutcome::Quit);
    assert_eq!(output.matches("Press ").count(), 1);

    Ok(())
}

#[test]
fn test_end_of_input_stops_browsing() -> Result<()> {
    let engine = ScriptedEngine::new(23);
    let (outcome, _) = browse(&engine, &PagerConfig::default(), "n\n")?;
    assert_eq!(outcome, BrowseOutcome::EndOfInput);

    let engine = ScriptedEngine::new(120).with_first_cap(30);
    let (outcome, _) = browse(&engine, &PagerConfig::default(), "4\n")?;
    assert_eq!(outcome, BrowseOutcome::EndOfInput);

    Ok(())
}

#[test]
fn test_extra_display_fields() -> Result<()> {
    let engine = ScriptedEngine::new(1);
    let config = PagerConfig {
        display_fields: vec!["title".to_string(), "signature".to_string(), "missing".to_string()],
        ..PagerConfig::default()
    };
    let (_, output) = browse(&engine, &config, "")?;

    assert_eq!(
        output,
        "1 total matching documents\n1. Doc 0\n   signature: fn doc_0()\n"
    );

    Ok(())
}

#[test]
fn test_custom_page_size() -> Result<()> {
    let engine = ScriptedEngine::new(7);
    let config = PagerConfig {
        page_size: 3,
        overfetch_factor: 1,
        ..PagerConfig::default()
    };
    let (_, output) = browse(&engine, &config, "n\ny\nn\nq\n")?;

    assert_eq!(result_ranks(&output), (1..=7).collect::<Vec<_>>());
    assert_eq!(engine.capacities(), vec![3, 7]);

    Ok(())
}

#[test]
fn test_fetch_failure_aborts_browsing() {
    let engine = ScriptedEngine::new(5).failing_fetch();
    let err = browse(&engine, &PagerConfig::default(), "").unwrap_err();
    assert!(matches!(err, SynsearchError::SearchEngine(_)));
}
