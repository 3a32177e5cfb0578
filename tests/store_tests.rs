//! Tests for the Store facade, codecs and id allocation
//!
//! These tests verify:
//! - CRUD semantics end to end over a real file
//! - Monotonic id assignment, seeded from file contents
//! - Codec registry resolution and failure surfacing
//! - Delimited field-chain codecs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use linestore::{
    Codec, CodecRegistry, Config, DelimitedFields, Entity, IdAllocator, Newline, Store, StoreError,
};
use tempfile::TempDir;

// =============================================================================
// Test Entities and Codecs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Term {
    id: i64,
    name: String,
    meaning: String,
    usage: String,
    part_of_speech: String,
}

impl Term {
    fn new(name: &str, meaning: &str, usage: &str, part_of_speech: &str) -> Self {
        Self {
            id: 0,
            name: name.into(),
            meaning: meaning.into(),
            usage: usage.into(),
            part_of_speech: part_of_speech.into(),
        }
    }
}

impl Entity for Term {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[derive(Debug)]
struct TermFields;

impl DelimitedFields for TermFields {
    type Entity = Term;

    fn to_fields(&self, term: &Term) -> Option<Vec<String>> {
        Some(vec![
            term.name.clone(),
            term.meaning.clone(),
            term.usage.clone(),
            term.part_of_speech.clone(),
        ])
    }

    fn from_fields(&self, fields: &[&str]) -> Option<Term> {
        if fields.len() != 4 {
            return None;
        }
        Some(Term::new(fields[0], fields[1], fields[2], fields[3]))
    }
}

/// Entity whose codec always refuses both directions
#[derive(Debug, Default)]
struct Opaque {
    id: i64,
}

impl Entity for Opaque {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[derive(Debug)]
struct RejectingCodec;

impl Codec<Opaque> for RejectingCodec {
    fn serialize(&self, _entity: &Opaque) -> Option<String> {
        None
    }

    fn deserialize(&self, _body: &str) -> Option<Opaque> {
        None
    }
}

/// Entity that silently ignores id assignment
#[derive(Debug, Default)]
struct Stubborn;

impl Entity for Stubborn {
    fn id(&self) -> i64 {
        0
    }

    fn set_id(&mut self, _id: i64) {}
}

#[derive(Debug)]
struct StubbornCodec;

impl Codec<Stubborn> for StubbornCodec {
    fn serialize(&self, _entity: &Stubborn) -> Option<String> {
        Some("stubborn".into())
    }

    fn deserialize(&self, _body: &str) -> Option<Stubborn> {
        Some(Stubborn)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("terms.txt");
    (temp_dir, path)
}

fn term_registry() -> CodecRegistry {
    let mut registry = CodecRegistry::new();
    registry.register::<Term>(TermFields).unwrap();
    registry
}

fn term_store(path: &Path) -> Store {
    Store::new(Config::new(path), term_registry())
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_new_entity_on_empty_file_assigns_id_1() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut term = Term::new("тест", "test", "", "noun");
    let id = store.save(&mut term).unwrap();

    assert_eq!(id, 1);
    assert_eq!(term.id, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1]тест#test##noun");
}

#[test]
fn test_save_assigns_strictly_increasing_ids() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let ids: Vec<i64> = (0..5)
        .map(|i| {
            let mut term = Term::new(&format!("term{i}"), "meaning", "", "noun");
            store.save(&mut term).unwrap()
        })
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_save_seeds_the_id_counter_from_out_of_order_file_contents() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "[9]a#b#c#d\n[12]a#b#c#d\n[11]a#b#c#d").unwrap();
    let store = term_store(&path);

    let mut term = Term::new("new", "entry", "", "noun");

    assert_eq!(store.save(&mut term).unwrap(), 13);
}

#[test]
fn test_save_with_nonzero_id_updates_the_record_in_place() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut first = Term::new("тест", "test", "", "noun");
    let mut second = Term::new("задача", "task", "", "noun");
    store.save(&mut first).unwrap();
    store.save(&mut second).unwrap();

    first.meaning = "a-considerably-longer-meaning".into();
    let id = store.save(&mut first).unwrap();

    assert_eq!(id, first.id);
    let all: Vec<Term> = store.get_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], first);
    assert_eq!(all[1], second);
}

#[test]
fn test_save_serialization_failure_surfaces_typed() {
    let (_temp, path) = setup_temp_file();
    let mut registry = CodecRegistry::new();
    registry.register::<Opaque>(RejectingCodec).unwrap();
    let store = Store::new(Config::new(&path), registry);

    let mut entity = Opaque::default();

    assert!(matches!(
        store.save(&mut entity).unwrap_err(),
        StoreError::Serialization { .. }
    ));
}

#[test]
fn test_save_writes_the_configured_crlf_convention() {
    let (_temp, path) = setup_temp_file();
    let config = Config::builder().path(&path).newline(Newline::CrLf).build();
    let store = Store::new(config, term_registry());

    store.save(&mut Term::new("a", "b", "", "x")).unwrap();
    store.save(&mut Term::new("c", "d", "", "y")).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[1]a#b##x\r\n[2]c#d##y"
    );
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_get_one_returns_the_saved_entity_deep_equal() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut term = Term::new("тест", "test", " in usage", "noun");
    let id = store.save(&mut term).unwrap();

    let fetched: Term = store.get_one(id).unwrap().unwrap();
    assert_eq!(fetched, term);
}

#[test]
fn test_get_one_returns_none_when_absent() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);
    store.save(&mut Term::new("a", "b", "", "c")).unwrap();

    let fetched: Option<Term> = store.get_one(122).unwrap();
    assert_eq!(fetched, None);
}

#[test]
fn test_get_all_on_empty_file_returns_an_empty_list() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let all: Vec<Term> = store.get_all().unwrap();
    assert!(all.is_empty());
}

#[test]
fn test_get_all_returns_every_saved_entity_in_order() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut terms = vec![
        Term::new("skip", "пропустить", "", "verb"),
        Term::new("тест", "test", "", "noun"),
        Term::new("задача", "task", "", "noun"),
    ];
    for term in &mut terms {
        store.save(term).unwrap();
    }

    let all: Vec<Term> = store.get_all().unwrap();
    assert_eq!(all, terms);
}

#[test]
fn test_get_all_deserialization_failure_surfaces_typed() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "[1]only#two").unwrap();
    let store = term_store(&path);

    let result: linestore::Result<Vec<Term>> = store.get_all();

    assert!(matches!(
        result.unwrap_err(),
        StoreError::Deserialization { .. }
    ));
}

#[test]
fn test_get_one_rejects_an_entity_that_ignores_id_assignment() {
    let (_temp, path) = setup_temp_file();
    fs::write(&path, "[7]stubborn").unwrap();
    let mut registry = CodecRegistry::new();
    registry.register::<Stubborn>(StubbornCodec).unwrap();
    let store = Store::new(Config::new(&path), registry);

    let result: linestore::Result<Option<Stubborn>> = store.get_one(7);

    assert!(matches!(
        result.unwrap_err(),
        StoreError::LineFetching(_)
    ));
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove_deletes_exactly_one_record() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut a = Term::new("a", "1", "", "x");
    let mut b = Term::new("b", "2", "", "y");
    let mut c = Term::new("c", "3", "", "z");
    store.save(&mut a).unwrap();
    store.save(&mut b).unwrap();
    store.save(&mut c).unwrap();

    store.remove(b.id).unwrap();

    let gone: Option<Term> = store.get_one(b.id).unwrap();
    assert_eq!(gone, None);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);

    let all: Vec<Term> = store.get_all().unwrap();
    assert_eq!(all, vec![a, c]);
}

#[test]
fn test_remove_of_an_absent_id_is_a_noop() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);
    store.save(&mut Term::new("a", "b", "", "c")).unwrap();

    store.remove(99).unwrap();

    let all: Vec<Term> = store.get_all().unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn test_removed_ids_are_never_reissued_within_a_process() {
    let (_temp, path) = setup_temp_file();
    let store = term_store(&path);

    let mut a = Term::new("a", "b", "", "c");
    store.save(&mut a).unwrap();
    store.remove(a.id).unwrap();

    let mut b = Term::new("d", "e", "", "f");

    assert_eq!(store.save(&mut b).unwrap(), 2);
}

// =============================================================================
// Codec Registry Tests
// =============================================================================

#[test]
fn test_registering_a_second_codec_for_a_type_fails() {
    let mut registry = CodecRegistry::new();
    registry.register::<Term>(TermFields).unwrap();

    assert!(matches!(
        registry.register::<Term>(TermFields).unwrap_err(),
        StoreError::CodecAlreadyRegistered { .. }
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_resolving_an_unregistered_codec_fails() {
    let registry = CodecRegistry::new();

    assert!(matches!(
        registry.get::<Term>().unwrap_err(),
        StoreError::CodecNotRegistered { .. }
    ));
}

#[test]
fn test_store_surfaces_a_missing_codec_before_any_io() {
    let (_temp, path) = setup_temp_file();
    let store = Store::new(Config::new(&path), CodecRegistry::new());

    let result: linestore::Result<Vec<Term>> = store.get_all();

    assert!(matches!(
        result.unwrap_err(),
        StoreError::CodecNotRegistered { .. }
    ));
    assert!(!path.exists());
}

// =============================================================================
// Delimited Field-Chain Tests
// =============================================================================

#[test]
fn test_delimited_serialize_joins_without_a_trailing_separator() {
    let term = Term::new("тест", "test", "", "noun");

    assert_eq!(
        TermFields.serialize(&term).unwrap(),
        "тест#test##noun"
    );
}

#[test]
fn test_delimited_chain_with_empty_last_field_roundtrips() {
    let term = Term::new("a", "b", "c", "");

    let body = TermFields.serialize(&term).unwrap();
    assert_eq!(body, "a#b#c#");

    let back = TermFields.deserialize(&body).unwrap();
    assert_eq!(back, term);
}

#[test]
fn test_delimited_deserialize_rejects_a_wrong_field_count() {
    assert_eq!(TermFields.deserialize("only#three#fields"), None);
}

// =============================================================================
// Id Allocation Tests
// =============================================================================

#[test]
fn test_concurrent_allocations_never_collide() {
    let allocator = Arc::new(IdAllocator::new());
    let path = Path::new("shared.txt");
    let issued = Mutex::new(Vec::new());

    crossbeam::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|_| {
                for _ in 0..50 {
                    let id = allocator.allocate(path, || Ok(0)).unwrap();
                    issued.lock().unwrap().push(id);
                }
            });
        }
    })
    .unwrap();

    let mut ids = issued.into_inner().unwrap();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 400);
    assert_eq!(*ids.first().unwrap(), 1);
    assert_eq!(*ids.last().unwrap(), 400);
}

#[test]
fn test_stores_sharing_an_allocator_issue_distinct_ids() {
    let (_temp, path) = setup_temp_file();
    let ids = Arc::new(IdAllocator::new());

    let store_a = Store::with_id_allocator(Config::new(&path), term_registry(), Arc::clone(&ids));
    let store_b = Store::with_id_allocator(Config::new(&path), term_registry(), Arc::clone(&ids));

    let mut t1 = Term::new("a", "b", "", "c");
    let mut t2 = Term::new("d", "e", "", "f");
    let mut t3 = Term::new("g", "h", "", "i");

    assert_eq!(store_a.save(&mut t1).unwrap(), 1);
    assert_eq!(store_b.save(&mut t2).unwrap(), 2);
    assert_eq!(store_a.save(&mut t3).unwrap(), 3);
}

#[test]
fn test_a_fresh_allocator_rederives_its_seed_from_the_file() {
    let (_temp, path) = setup_temp_file();

    {
        let store = term_store(&path);
        store.save(&mut Term::new("a", "b", "", "c")).unwrap();
        store.save(&mut Term::new("d", "e", "", "f")).unwrap();
    }

    // a new store with its own allocator stands in for a process restart
    let store = term_store(&path);
    let mut term = Term::new("g", "h", "", "i");

    assert_eq!(store.save(&mut term).unwrap(), 3);
}

#[test]
fn test_allocator_caches_are_kept_per_path() {
    let allocator = IdAllocator::new();

    let first = allocator.allocate(Path::new("one.txt"), || Ok(10)).unwrap();
    let second = allocator.allocate(Path::new("two.txt"), || Ok(0)).unwrap();

    assert_eq!(first, 11);
    assert_eq!(second, 1);
    assert_eq!(allocator.last_issued(Path::new("one.txt")), Some(11));
    assert_eq!(allocator.last_issued(Path::new("three.txt")), None);
}
