use std::sync::Arc;
use std::thread;

use ini_i18n_runtime::{Arg, RuntimeError, Store, args, tr};

const SAMPLE: &str = r#"
[plurals]
file.one = file
file.other = files

dog.zero = dog
dog.one = %(dog.zero)s
dog.two = dogs
dog.few = %(dog.two)s
dog.other = %(dog.two)s

[messages]
test1 = I have %[1]d changed ${file, 1} and deleted %[2]d ${file, 2}
test2 = I bought %[1]d ${cat, 1} and sold %[2]d ${dog, 2}
test3 = I have %[1]d ${dog, 10}
test4 = I have a dream
test5 = My name is %s
test6 = I have %[1]d ${dog, 1}
"#;

const ZH_CN: &str = r#"
[plurals]
file.other = 文件

[messages]
test1 = 我变更了 %[1]d 个${file, 1}并删除了 %[2]d 个${file, 2}
"#;

fn english_store() -> Store {
    let mut store = Store::new();
    store
        .add_locale("en-US", "English", SAMPLE.as_bytes())
        .expect("en-US");
    store
}

#[test]
fn duplicated_locale_is_rejected() {
    let mut store = Store::new();
    store.add_locale("en-US", "English", "").expect("first");
    let err = store
        .add_locale("en-US", "English", "")
        .expect_err("duplicate");
    assert_eq!(err.to_string(), "duplicated locales for \"en-US\"");
}

#[test]
fn bad_index_is_reported_before_duplicate() {
    let mut store = Store::new();
    store.add_locale("en-US", "English", "").expect("first");
    let err = store
        .add_locale("en-US", "English", "\n[messages]\ntest1 = I have %[1]d ${cat, 0}\n")
        .expect_err("bad index");
    assert!(matches!(err, RuntimeError::Compile(_)));
    assert_eq!(
        err.to_string(),
        "new locale: the smallest index is 1 but got 0 for \"${cat, 0}\""
    );
}

#[test]
fn lookup_returns_registered_locale() {
    let mut store = Store::new();
    let added = store.add_locale("en-US", "English", "").expect("en-US");
    let found = store.locale("en-US").expect("lookup");
    assert!(Arc::ptr_eq(&added, &found));
    let err = store.locale("zh-CN").expect_err("missing");
    assert_eq!(err.to_string(), "locale not found for \"zh-CN\"");
}

#[test]
fn translates_sample_messages() {
    let store = english_store();
    let en = store.locale("en-US").expect("en-US");
    let cases: [(&str, Vec<Arg>, &str); 7] = [
        (
            "messages::test1",
            args![1, 2],
            "I have 1 changed file and deleted 2 files",
        ),
        (
            "messages::test2",
            args![1, 2],
            "I bought 1 <no such plural: cat> and sold 2 dogs",
        ),
        ("messages::test3", args![1], "I have 1 <no arg for index 10>"),
        ("messages::test4", args![], "I have a dream"),
        ("messages::404", args![], "<no such key: messages::404>"),
        ("messages::test5", args!["Joe"], "My name is Joe"),
        ("messages::test6", args![1], "I have 1 dog"),
    ];
    for (key, args, want) in cases {
        assert_eq!(en.translate(key, &args), want, "key {key}");
    }
}

#[test]
fn interpolated_plural_forms_resolve() {
    let store = english_store();
    let en = store.locale("en-US").expect("en-US");
    assert_eq!(tr!(en, "messages::test6", 3), "I have 3 dogs");
    assert_eq!(tr!(en, "messages::test6", 1u64), "I have 1 dog");
    assert_eq!(tr!(en, "messages::test5", "Ann"), "My name is Ann");
}

#[test]
fn translates_with_single_hop_fallback() {
    let mut store = english_store();
    let zh = store
        .add_locale("zh-CN", "简体中文", ZH_CN)
        .expect("zh-CN");
    let en = store.locale("en-US").expect("en-US");
    assert_eq!(
        zh.translate_with_fallback(&en, "messages::test1", &args![1, 2]),
        "我变更了 1 个文件并删除了 2 个文件"
    );
    assert_eq!(
        zh.translate_with_fallback(&en, "messages::test4", &[]),
        "I have a dream"
    );
    let languages: Vec<(&str, &str)> = store.languages().collect();
    assert_eq!(languages, [("en-US", "English"), ("zh-CN", "简体中文")]);
}

#[test]
fn translations_are_shared_across_threads() {
    let store = Arc::new(english_store());
    let handles: Vec<_> = (1..=4)
        .map(|count| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let en = store.locale("en-US").expect("en-US");
                en.translate("messages::test1", &args![count, count])
            })
        })
        .collect();
    let results: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().expect("join"))
        .collect();
    assert_eq!(results[0], "I have 1 changed file and deleted 1 file");
    assert_eq!(results[3], "I have 4 changed files and deleted 4 files");
}
