use fastrand::Rng;
use smartpdf::db::StoredDigest;
use smartpdf::storage::text_hash;
use smartpdf::{Digest, SearchIndex, Storage};
use tempfile::tempdir;

const VOLCANO: &str = "Volcanoes of the Pacific Ring\n\
    Volcanoes form where tectonic plates collide beneath the ocean. \
    Many volcanoes erupt without warning after long quiet periods. \
    Monitoring stations track gases released by active volcanoes. \
    Scientists use satellites to watch volcanoes from orbit.";

const ORCHARD: &str = "Keeping an Apple Orchard\n\
    Apple trees need pruning every late winter. \
    Orchard owners thin apple blossoms to grow larger fruit. \
    Bees carry pollen between apple varieties in spring. \
    Harvest begins when apple seeds turn dark brown.";

const GEOLOGY: &str = "Granite forms when magma cools slowly underground. \
    Basalt covers most of the ocean floor worldwide. \
    Sandstone records ancient deserts and shorelines. \
    Limestone often contains fossils of marine creatures. \
    Glaciers carved deep valleys across northern Europe. \
    Volcanoes release gases that change regional climate. \
    Earthquakes happen where tectonic plates grind together. \
    Rivers deposit sediment in broad fertile deltas. \
    Erosion slowly wears mountains into rolling hills. \
    Minerals crystallize from cooling hydrothermal fluids. \
    Geologists date rocks using radioactive isotopes. \
    Caves form where acidic water dissolves limestone.";

fn stored(source: &str, text: &str) -> StoredDigest {
    let digest = Digest::build(text, 60, &mut Rng::with_seed(4));
    StoredDigest::new(source.to_string(), 60, text, digest)
}

#[test]
fn store_get_and_delete() {
    let dir = tempdir().unwrap();
    let storage = Storage::open(dir.path()).unwrap();

    let entry = stored("/docs/volcano.pdf", VOLCANO);
    storage.store(&entry).unwrap();
    assert_eq!(storage.count(), 1);

    let loaded = storage.get("/docs/volcano.pdf").unwrap().expect("stored");
    assert_eq!(loaded.digest, entry.digest);
    assert_eq!(loaded.length, 60);

    assert!(storage.get("/docs/missing.pdf").unwrap().is_none());
    assert!(storage.delete("/docs/volcano.pdf").unwrap());
    assert!(!storage.delete("/docs/volcano.pdf").unwrap());
    assert_eq!(storage.count(), 0);
}

#[test]
fn restoring_a_source_replaces_it() {
    let dir = tempdir().unwrap();
    let storage = Storage::open(dir.path()).unwrap();

    storage.store(&stored("notes.txt", VOLCANO)).unwrap();
    storage.store(&stored("notes.txt", ORCHARD)).unwrap();
    storage.store(&stored("other.txt", VOLCANO)).unwrap();

    assert_eq!(storage.count(), 2);
    let notes = storage.get("notes.txt").unwrap().unwrap();
    assert!(notes.digest.summary.title.contains("Apple"));

    let listed = storage.list_all().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].created_at >= listed[1].created_at);
}

#[test]
fn quiz_is_reused_only_for_the_same_text() {
    let dir = tempdir().unwrap();
    let storage = Storage::open(dir.path()).unwrap();

    let entry = stored("stdin", GEOLOGY);
    assert!(!entry.digest.quiz.is_empty());
    storage.store(&entry).unwrap();

    assert!(storage.reusable_quiz("stdin", ORCHARD).unwrap().is_none());
    assert_eq!(
        storage.reusable_quiz("stdin", GEOLOGY).unwrap(),
        Some(entry.digest.quiz)
    );
    assert!(storage.reusable_quiz("other", GEOLOGY).unwrap().is_none());
}

#[test]
fn records_without_a_text_hash_are_never_reused() {
    let dir = tempdir().unwrap();
    let storage = Storage::open(dir.path()).unwrap();

    let mut entry = stored("notes.txt", GEOLOGY);
    entry.text_hash.clear();
    storage.store(&entry).unwrap();

    assert!(!entry.built_from(GEOLOGY));
    assert!(storage.reusable_quiz("notes.txt", GEOLOGY).unwrap().is_none());
}

#[test]
fn text_hash_distinguishes_edits() {
    assert_eq!(text_hash(VOLCANO), text_hash(VOLCANO));
    assert_ne!(text_hash(VOLCANO), text_hash(&format!("{VOLCANO} ")));
    assert_eq!(text_hash(VOLCANO).len(), 64);
}

#[test]
fn search_finds_digest_by_content() {
    let dir = tempdir().unwrap();
    let index = SearchIndex::open(dir.path().join("search_index")).unwrap();

    let volcano = stored("volcano.pdf", VOLCANO);
    let orchard = stored("orchard.docx", ORCHARD);
    index.index_digest(&volcano.source, &volcano.digest).unwrap();
    index.index_digest(&orchard.source, &orchard.digest).unwrap();

    assert_eq!(index.search("volcanoes", 10).unwrap(), vec!["volcano.pdf"]);
    assert_eq!(index.search("apple", 10).unwrap(), vec!["orchard.docx"]);
    assert!(index.search("submarine", 10).unwrap().is_empty());
}

#[test]
fn reindexing_replaces_old_entry() {
    let dir = tempdir().unwrap();
    let index = SearchIndex::open(dir.path()).unwrap();

    let first = stored("notes.txt", VOLCANO);
    let second = stored("notes.txt", ORCHARD);
    index.index_digest(&first.source, &first.digest).unwrap();
    index.index_digest(&second.source, &second.digest).unwrap();

    assert!(index.search("volcanoes", 10).unwrap().is_empty());
    assert_eq!(index.search("apple", 10).unwrap(), vec!["notes.txt"]);
}
