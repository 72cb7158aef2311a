use reconcile_list::{VecSection, apply_sections, diff_sections};

/// Diffs two snapshots of a sectioned playlist and prints the resulting
/// scripts, then patches the old snapshot to prove the round trip.
///
/// Run it with:
/// `cargo run --example playlist`
fn main() {
    let before = vec![
        VecSection::new(("queue", "Up next"), vec![
            (101, "Blue Monday"),
            (102, "Atmosphere"),
            (103, "Disorder"),
        ]),
        VecSection::new(("history", "Recently played"), vec![(201, "Ceremony")]),
    ];

    let after = vec![
        VecSection::new(("queue", "Up next"), vec![
            (103, "Disorder"),
            (101, "Blue Monday (2020 remaster)"),
            (104, "Transmission"),
        ]),
        VecSection::new(("history", "Recently played"), vec![
            (102, "Atmosphere"),
            (201, "Ceremony"),
        ]),
    ];

    let changes = diff_sections(&before, &after);

    println!("section changes:");
    for change in &changes.sections {
        println!("  {change}");
    }

    println!("item changes:");
    for change in &changes.items {
        println!("  {change}");
    }

    let mut patched = before.clone();
    apply_sections(changes, &mut patched);

    assert_eq!(patched, after);
    println!("patching the old snapshot reproduces the new one");
}
