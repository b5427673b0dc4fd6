//! Every walkthrough renders a complete panel at every step.

use reconcile_lab::panels::Block;
use reconcile_lab::{render, Era, Explainer, ManualScheduler, Settings};

#[test]
fn every_step_of_every_walkthrough_renders() {
    for era in Era::all() {
        for scenario in era.scenarios() {
            let mut ex = Explainer::new(*era, ManualScheduler::new(), Settings::default());
            ex.select(*scenario);
            for step in 0..=scenario.max_step() {
                assert_eq!(ex.step(), step);
                let view = render(&ex);
                assert!(!view.title.is_empty());
                assert!(!view.columns.is_empty(), "{era:?}/{scenario:?}@{step}");
                assert!(
                    view.columns.iter().all(|s| !s.blocks.is_empty()),
                    "{era:?}/{scenario:?}@{step} has an empty section"
                );
                assert_eq!(view.progress.is_some(), *era == Era::Future);
                ex.advance_once();
            }
            // Advancing past the last step wraps.
            assert_eq!(ex.step(), 0);
        }
    }
}

#[test]
fn learn_more_appears_only_for_remaining_challenges() {
    for era in Era::all() {
        let ex = Explainer::new(*era, ManualScheduler::new(), Settings::default());
        let has_links = render(&ex)
            .footer
            .iter()
            .flat_map(|s| &s.blocks)
            .any(|b| matches!(b, Block::Links(_)));
        assert_eq!(has_links, *era == Era::Future);
    }
}

#[test]
fn control_labels_follow_the_autoplay_mode() {
    let mut ex = Explainer::new(Era::Legacy, ManualScheduler::new(), Settings::default());
    assert_eq!(render(&ex).controls.toggle_label, "Play");
    ex.start();
    assert_eq!(render(&ex).controls.toggle_label, "Pause");
    assert!(render(&ex).controls.show_reset);

    let mut ex = Explainer::new(Era::Future, ManualScheduler::new(), Settings::default());
    assert_eq!(render(&ex).controls.toggle_label, "Start Animation");
    ex.start();
    let controls = render(&ex).controls;
    assert_eq!(controls.toggle_label, "Stop Animation");
    assert_eq!(controls.step_label, "Next Step");
    assert!(!controls.show_reset);
}
