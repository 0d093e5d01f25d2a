use std::path::Path;

use email_reply_parser::{Fragment, Message, Variant, parse, parse_reply};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn read(name: &str) -> Message {
    Variant::Standard.parse(&fixture(name))
}

fn flags(message: &Message, flag: fn(&Fragment) -> bool) -> Vec<bool> {
    message.fragments().iter().map(flag).collect()
}

#[test]
fn test_top_post_with_quoted_history() {
    let message = parse(
        "Hi,\nThanks\n\n> old message\n> more old",
        Variant::Standard.patterns(),
    );

    assert_eq!(message.fragments().len(), 2);
    assert_eq!(message.fragments()[0].content(), "Hi,\nThanks\n\n");
    assert!(!message.fragments()[0].is_quoted());
    assert!(!message.fragments()[0].is_hidden());
    assert_eq!(
        message.fragments()[1].content(),
        "> old message\n> more old"
    );
    assert!(message.fragments()[1].is_quoted());
    assert!(message.fragments()[1].is_hidden());
    assert_eq!(message.reply(), "Hi,\nThanks\n\n");
}

#[test]
fn test_empty_body() {
    let message = parse("", Variant::Standard.patterns());

    assert!(message.is_empty());
    assert_eq!(message.reply(), "");
    assert_eq!(parse_reply("", Variant::Gateway.patterns()), "");
}

#[test]
fn test_reply_with_header_quotes_and_signature() {
    let message = read("inline_reply.txt");

    assert_eq!(message.fragments().len(), 5);
    assert_eq!(
        flags(&message, Fragment::is_quoted),
        [false, true, false, true, false]
    );
    assert_eq!(
        flags(&message, Fragment::is_signature),
        [false, false, false, false, true]
    );
    assert_eq!(
        flags(&message, Fragment::is_hidden),
        [false, true, true, true, true]
    );
    assert_eq!(
        flags(&message, Fragment::has_headers),
        [false, true, false, false, false]
    );

    let fragments = message.fragments();
    assert!(fragments[0].content().starts_with("Hi,"));
    assert!(fragments[1].content().contains("Karl Mair"));
    assert!(fragments[3].content().contains("> Is there an easy way"));
    assert_eq!(
        fragments[4].content(),
        "\n--\nSean Cribbs\nDeveloper Advocate\n"
    );

    let reply = message.reply();
    assert!(reply.contains("You can list the keys for the bucket"));
    assert!(!reply.contains("wrote:"));
    assert!(!reply.contains("Sean Cribbs"));
    assert_eq!(message.signature(), Some(fragments[4].content()));
}

#[test]
fn test_wrapped_reply_header_is_collapsed() {
    let message = read("wrapped_header.txt");

    assert!(message.fragments()[0].content().contains("I get"));
    assert_eq!(
        message.fragments()[1].content(),
        "> On Dec 16, 2011, at 12:47 PM, Corey Donohoe <reply@reply.github.com> wrote:\n"
    );
    assert!(message.fragments()[1].is_quoted());
    assert!(
        message
            .reply()
            .contains("Sent from a magnificent torch of pixels")
    );
}

#[test]
fn test_words_starting_with_on_are_not_headers() {
    let reply = Variant::Standard.parse_reply(&fixture("one_is_not_on.txt"));

    assert!(reply.contains("One outstanding question I had:"));
    assert!(!reply.contains("On Oct 1, 2012, at 11:55 PM, Dave Tapley wrote:"));
    assert!(!reply.contains("lastLocation"));
}

#[test]
fn test_body_without_markers_is_one_fragment() {
    let text = fixture("no_markers.txt");
    let message = read("no_markers.txt");

    assert_eq!(message.fragments().len(), 1);
    assert!(!message.fragments()[0].is_hidden());
    assert_eq!(message.reply(), text);
}

#[test]
fn test_windows_line_endings() {
    let message = Variant::Standard.parse(
        "Awesome! :+1:\r\n\r\nOn Fri, Jan 3, 2014 at 1:01 PM, Bob <bob@example.com> wrote:\r\n\r\n> Steps 0-2 are done\r\n",
    );

    assert!(!message.text().contains('\r'));
    assert!(message.fragments()[0].content().contains(":+1:"));
    assert!(message.fragments()[1].content().contains("On Fri"));
    assert!(message.fragments()[3].content().contains("Steps 0-2"));
    assert_eq!(message.reply(), "Awesome! :+1:\n\n");
}

#[test]
fn test_sent_from_my_device_is_a_signature() {
    let text = "Will do.\n\nSent from my iPhone\n";

    for variant in [Variant::Standard, Variant::Gateway] {
        let reply = variant.parse_reply(text);
        assert!(!reply.contains("Sent from my iPhone"), "{variant}");
        assert_eq!(reply, "Will do.\n");
    }
}

#[test]
fn test_signature_start_inside_paragraph_is_text() {
    let text = "See you there\n-- \nAlex";
    let message = Variant::Standard.parse(text);

    assert_eq!(message.fragments().len(), 1);
    assert!(!message.fragments()[0].is_signature());
    assert_eq!(message.reply(), text);
}

#[test]
fn test_signature_start_after_blank_line() {
    let message = Variant::Standard.parse("See you there\n\n-- \nAlex");

    assert_eq!(message.fragments().len(), 2);
    assert_eq!(message.fragments()[0].content(), "See you there\n");
    assert_eq!(message.fragments()[1].content(), "\n-- \nAlex");
    assert!(message.fragments()[1].is_signature());
    assert_eq!(message.reply(), "See you there\n");
}

#[test]
fn test_sign_off_on_first_line_keeps_reply() {
    let message = Variant::Gateway.parse("Many thanks\nI will check the figures tonight.\n\n> old\n");

    assert_eq!(message.fragments().len(), 2);
    assert!(!message.fragments()[0].is_signature());
    assert_eq!(
        message.reply(),
        "Many thanks\nI will check the figures tonight.\n\n"
    );
}

#[test]
fn test_reply_opening_with_on_is_kept() {
    let text = "On Monday the build broke again.\nI fixed it.\n\nOn Tue, Bob wrote:\n> is it fixed?\n";

    for variant in [Variant::Standard, Variant::Gateway] {
        let message = variant.parse(text);

        assert_eq!(message.fragments().len(), 2, "{variant}");
        assert!(message.fragments()[1].has_headers());
        assert_eq!(
            message.fragments()[1].content(),
            "> On Tue, Bob wrote:\n> is it fixed?\n"
        );
        assert_eq!(
            message.reply(),
            "On Monday the build broke again.\nI fixed it.\n\n",
            "{variant}"
        );
    }
}

#[test]
fn test_reply_header_does_not_span_blank_lines() {
    let text = "On call this week.\n\nAs Sam wrote: the rota is fixed.\n";
    let message = Variant::Standard.parse(text);

    assert_eq!(message.fragments().len(), 1);
    assert!(!message.fragments()[0].has_headers());
    assert_eq!(message.reply(), text);
}

#[test]
fn test_outlook_separator_hides_rest() {
    let message = Variant::Standard.parse(
        "Done.\n\n-----Original Message-----\nFrom: Bob\nPlease review.\n",
    );

    assert_eq!(message.reply(), "Done.\n");
    assert!(message.fragments()[1].is_signature());
    assert!(message.fragments()[1].content().contains("Please review."));
}

#[test]
fn test_quoted_only_body_has_no_reply() {
    let message = Variant::Standard.parse("> just\n> quoted\n");

    assert_eq!(message.fragments().len(), 1);
    assert!(message.fragments()[0].is_hidden());
    assert_eq!(message.reply(), "");
    assert_eq!(message.quoted_text(), "> just\n> quoted\n");
}

#[test]
fn test_reply_is_stable_when_reparsed() {
    let reply = Variant::Standard.parse_reply(&fixture("inline_reply.txt"));
    assert_eq!(Variant::Standard.parse_reply(&reply), reply);
}
