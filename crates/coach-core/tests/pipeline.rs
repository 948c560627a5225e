// End-to-end tests: raw stat CSV -> baseline -> deficits -> training drills.

use std::path::Path;

use coach_core::position::Position;
use coach_core::recommend::{recommend, UserProfile};
use coach_core::season::Season;
use coach_core::stats::processor::attribute_names;
use coach_core::stats::DataHandler;
use coach_core::training::{TrainingEntry, TrainingRepository};

/// Fixture directory, relative to the crate root (the cwd for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn midfielders() -> DataHandler {
    DataHandler::load_season(Path::new(FIXTURES), Season::new(2022), Position::Midfielder)
        .expect("midfielder fixture should load")
}

#[test]
fn fixture_profiles_follow_midfielder_rules() {
    let handler = midfielders();
    let profiles = handler.profiles().unwrap();
    assert_eq!(profiles.len(), 4);
    assert_eq!(handler.attribute_names().unwrap(), attribute_names(Position::Midfielder));

    let rodri = profiles.iter().find(|p| p.name == "Rodri").unwrap();
    assert_eq!(rodri.get("Headed goals"), Some(50.0));
    assert_eq!(rodri.get("Duels"), Some(54.03));
    assert_eq!(rodri.get("Passes per match"), Some(86.43));
}

#[test]
fn baseline_scales_each_column() {
    let baseline = midfielders().normalized_baseline().unwrap();
    let ppm = baseline
        .attributes()
        .iter()
        .position(|a| a == "Passes per match")
        .unwrap();
    let odegaard = baseline.players().iter().position(|p| p == "Martin Odegaard").unwrap();
    let rodri = baseline.players().iter().position(|p| p == "Rodri").unwrap();
    assert_eq!(baseline.row(odegaard).unwrap()[ppm], 0.0);
    assert_eq!(baseline.row(rodri).unwrap()[ppm], 100.0);

    // Big chances: 31, 11, 14, 3 -> 100, 28.57, 39.29, 0
    assert_eq!(baseline.truncated_average("Big Chances Created"), Some(41));
    assert_eq!(baseline.truncated_average("Duels"), Some(25));
}

#[test]
fn weak_profile_gets_position_drills_worst_first() {
    let baseline = midfielders().normalized_baseline().unwrap();
    let repo = TrainingRepository::load(&Path::new(FIXTURES).join("training.csv")).unwrap();
    assert_eq!(repo.len(), 4);

    let mut profile = UserProfile::new(Position::Midfielder, baseline.attributes().to_vec());
    for attribute in baseline.attributes() {
        profile.set(attribute, 100);
    }
    profile.set("Duels", 0);
    profile.set("Big Chances Created", 0);

    let rec = recommend(&profile, &baseline, &repo).unwrap();
    assert_eq!(rec.candidates, ["Big Chances Created", "Duels"]);
    let names: Vec<&str> = rec.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["Chance creation rondo", "Through-ball patterns", "Duel boxes"]
    );
    assert_eq!(
        rec.entries[0].description,
        "5v2 in a 20x20 grid\nScore a point for every final ball"
    );
}

#[test]
fn added_entry_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training").join("training_01.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::copy(Path::new(FIXTURES).join("training.csv"), &path).unwrap();

    let mut repo = TrainingRepository::load(&path).unwrap();
    repo.add(
        TrainingEntry::new(
            "Pressing triggers",
            "Press on the back pass\\nRecover shape",
            "midfielder",
            vec!["Tackle success %".into()],
        ),
        true,
    )
    .unwrap();

    let reloaded = TrainingRepository::load(&path).unwrap();
    assert_eq!(reloaded.len(), 5);
    let added = reloaded.find("tackle success %", Some("midfielder"));
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].description, "Press on the back pass\nRecover shape");
    // Legacy rows are rewritten in the JSON list form.
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(r#""[""Duels"",""Aerial battles""]""#));
}
