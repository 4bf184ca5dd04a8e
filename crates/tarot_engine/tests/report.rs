use tarot_core::{CardVideo, Paragraph};
use tarot_engine::{
    render_paragraph_report, render_source_list, render_video_list, CrawlStatus, ParagraphReport,
};

#[test]
fn paragraph_report_lists_each_paragraph() {
    let report = ParagraphReport {
        url: "https://t/fool".to_string(),
        status: CrawlStatus::Success,
        total_paragraphs: 2,
        paragraphs: vec![
            Paragraph {
                index: 1,
                text: "First".to_string(),
                html: "<p>First</p>".to_string(),
            },
            Paragraph {
                index: 3,
                text: "Third".to_string(),
                html: "<p>Third</p>".to_string(),
            },
        ],
        error: None,
    };
    let text = render_paragraph_report(&report, "2026-01-01T00:00:00Z");
    assert!(text.starts_with("URL: https://t/fool\nFetched: 2026-01-01T00:00:00Z\nParagraphs: 2\n"));
    assert!(text.contains("[1]\nFirst\n"));
    assert!(text.contains("[3]\nThird\n"));
}

#[test]
fn video_list_skips_cards_without_mp4() {
    let videos = vec![
        CardVideo {
            card_name: "A".to_string(),
            card_url: "https://t/a".to_string(),
            video_mp4: Some("https://t/a.mp4".to_string()),
            video_webm: None,
        },
        CardVideo {
            card_name: "B".to_string(),
            card_url: "https://t/b".to_string(),
            video_mp4: None,
            video_webm: Some("https://t/b.webm".to_string()),
        },
    ];
    assert_eq!(render_video_list(&videos), "https://t/a.mp4\n");
}

#[test]
fn source_list_is_numbered() {
    let sources = vec!["https://a/1.png".to_string(), "https://a/2.png".to_string()];
    let text = render_source_list(&sources, "a/");
    assert!(text.starts_with("Sources containing 'a/':\n"));
    assert!(text.contains("1. https://a/1.png\n2. https://a/2.png\n"));
}
