use hangulize::prelude::*;

/// A toy language: doubled vowels are pronounced once, and consonants map
/// onto single jamo. Vowels are left alone so the trace shows both levels.
fn toy_spec() -> Spec {
    toy_spec_with(
        "
        --- the same vowel twice or more is one vowel
            (a) a+ | (e) e+ | (i) i+ | (o) o+ | (u) u+
        ",
        "$1$2$3$4$5",
    )
}

/// The toy language with its vowel run rule written with the `vowel` macro:
/// a vowel followed by any more vowels is the first one alone.
fn macro_toy_spec() -> Spec {
    toy_spec_with(
        "
        --- a run of vowels is its first vowel
            (<vowel>) <vowel>+
        ",
        "$1",
    )
}

fn toy_spec_with(collapse: &str, replacement: &str) -> Spec {
    let hgl = Hgl::new()
        .with(
            "lang",
            DictSection::new()
                .with("id", ["toy"])
                .with("code", ["xx"])
                .with("english", ["Toy"])
                .with("korean", ["장난감어"])
                .with("script", ["roman"]),
        )
        .with("config", DictSection::new().with("stage", ["draft"]))
        .with("vars", DictSection::new().with("vowel", ["a", "e", "i", "o", "u"]))
        .with("rewrite", ListSection::new().with(collapse, replacement))
        .with(
            "hangulize",
            ListSection::new()
                .with("k", "ㅋ")
                .with("n", "ㄴ")
                .with("t", "ㅌ"),
        )
        .with("test", ListSection::new().with("kanata", "ㅋaㄴaㅌa"));

    Spec::parse(&hgl).unwrap()
}

#[test]
fn test_kanata_is_deterministic() {
    let hangulizer = Hangulizer::new(toy_spec());

    let first = hangulizer.hangulize("kanata");
    assert_eq!(first, "ㅋaㄴaㅌa");
    for _ in 0..10 {
        assert_eq!(hangulizer.hangulize("kanata"), first);
    }
}

#[test]
fn test_kanata_trace() {
    let hangulizer = Hangulizer::new(toy_spec());
    let subwords = hangulizer.subwords("kanata");

    assert_eq!(
        subwords,
        vec![
            Subword::new("ㅋ", 2),
            Subword::new("a", 0),
            Subword::new("ㄴ", 2),
            Subword::new("a", 0),
            Subword::new("ㅌ", 2),
            Subword::new("a", 0),
        ]
    );

    let joined: String = subwords.iter().map(|sw| sw.word.as_str()).collect();
    assert_eq!(joined, hangulizer.hangulize("kanata"));
}

#[test]
fn test_doubled_vowels_collapse() {
    let hangulizer = Hangulizer::new(toy_spec());

    assert_eq!(hangulizer.hangulize("kaaanaataa"), "ㅋaㄴaㅌa");
    assert_eq!(
        hangulizer.subwords("kaana"),
        vec![
            Subword::new("ㅋ", 2),
            Subword::new("a", 1),
            Subword::new("ㄴ", 2),
            Subword::new("a", 0),
        ]
    );
}

#[test]
fn test_kanata_with_vowel_macro() {
    let spec = macro_toy_spec();
    assert_eq!(spec.rewrite()[0].regex().as_str(), "((?:a|e|i|o|u))(?:a|e|i|o|u)+");

    let hangulizer = Hangulizer::new(spec);
    let first = hangulizer.hangulize("kanata");
    assert_eq!(first, "ㅋaㄴaㅌa");
    for _ in 0..10 {
        assert_eq!(hangulizer.hangulize("kanata"), first);
    }

    assert_eq!(hangulizer.hangulize("kaaanaataa"), "ㅋaㄴaㅌa");
    assert_eq!(
        hangulizer.subwords("kaana"),
        vec![
            Subword::new("ㅋ", 2),
            Subword::new("a", 1),
            Subword::new("ㄴ", 2),
            Subword::new("a", 0),
        ]
    );
}

#[test]
fn test_trace_steps() {
    let hangulizer = Hangulizer::new(toy_spec());
    let steps: Vec<String> = hangulizer
        .trace("kaana")
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        steps,
        [
            "rewrite #0: kana",
            "hangulize #0: ㅋana",
            "hangulize #1: ㅋaㄴa",
        ]
    );
}

#[test]
fn test_self_test_passes() {
    let hangulizer = Hangulizer::new(toy_spec());
    assert!(hangulizer.self_test().is_empty());
}

#[test]
fn test_escaped_space_in_rule() {
    let hgl = Hgl::new()
        .with("lang", DictSection::new().with("id", ["spaced"]))
        .with("config", DictSection::new())
        .with(
            "rewrite",
            ListSection::new().with(
                "
                --- drop the article before a name
                    ^ d e l \\  
                ",
                "",
            ),
        )
        .with("hangulize", ListSection::new().with("l u c a", "루카"));

    let hangulizer = Hangulizer::new(Spec::parse(&hgl).unwrap());
    assert_eq!(hangulizer.hangulize("del luca"), "루카");
    assert_eq!(hangulizer.hangulize("delluca"), "del루카");
}

#[test]
fn test_non_ascii_input_keeps_boundaries() {
    let hgl = Hgl::new()
        .with("lang", DictSection::new().with("id", ["deu"]))
        .with("config", DictSection::new())
        .with("rewrite", ListSection::new().with("ß", "ss"))
        .with(
            "hangulize",
            ListSection::new().with("ss", "ㅅ").with("ü", "ㅟ"),
        );

    let hangulizer = Hangulizer::new(Spec::parse(&hgl).unwrap());
    let subwords = hangulizer.subwords("füße");
    assert_eq!(
        subwords,
        vec![
            Subword::new("f", 0),
            Subword::new("ㅟㅅ", 2),
            Subword::new("e", 0),
        ]
    );
}

#[cfg(feature = "serialization")]
#[test]
fn test_spec_from_json_document() {
    let spec = Spec::from_json(
        r#"{
            "lang": {"dict": {"id": ["toy"], "code": ["xx"]}},
            "config": {"dict": {"markers": ["-"]}},
            "vars": {"dict": {"vowel": ["a", "e", "i", "o", "u"]}},
            "rewrite": {"list": [["^(<vowel>)", "-$1"]]},
            "hangulize": {"list": [["-a", "-아"], ["k", "ㅋ"]]},
            "test": {"list": [["ak", "아ㅋ"]]}
        }"#,
    )
    .unwrap();

    let hangulizer = Hangulizer::new(spec);
    assert_eq!(hangulizer.hangulize("ak"), "아ㅋ");
    assert!(hangulizer.self_test().is_empty());
}
