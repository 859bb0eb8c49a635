use scraper::Html;

use super::*;
use crate::strategy::first_match;

fn frag(html: &str) -> Html {
    Html::parse_fragment(html)
}

#[test]
fn reviewer_name_prefers_profile_link() {
    let html = frag(
        r#"<div><strong>Elite '24</strong>
           <a href="/biz/other">Other</a>
           <a href="/user_details?userid=abc"><span>Jane</span> <span>D.</span></a></div>"#,
    );
    assert_eq!(
        first_match(html.root_element(), REVIEWER_NAME_STRATEGIES).as_deref(),
        Some("JaneD.")
    );
}

#[test]
fn reviewer_name_falls_back_to_bold_text() {
    let html = frag(r#"<div><a href="/user_details?userid=x"><img src="a.jpg"></a><b>Sam K.</b></div>"#);
    assert_eq!(
        first_match(html.root_element(), REVIEWER_NAME_STRATEGIES).as_deref(),
        Some("Sam K.")
    );
}

#[test]
fn avatar_is_first_image_source() {
    let html = frag(r#"<div><img src="https://s3-media0.fl.yelpcdn.com/u/1.jpg"><img src="b.jpg"></div>"#);
    assert_eq!(
        avatar_url(html.root_element()).as_deref(),
        Some("https://s3-media0.fl.yelpcdn.com/u/1.jpg")
    );
}

#[test]
fn reviewer_details_scan_visible_text() {
    let html = frag(
        "<div><span>1,204</span> <span>reviews</span><span>87 friends</span><span>12 photos</span></div>",
    );
    assert_eq!(
        reviewer_details(html.root_element()),
        ReviewerDetails {
            total_reviews: 1204,
            total_friends: 87,
            business_photos_uploaded: 12,
        }
    );
}

#[test]
fn reviewer_details_default_to_zero() {
    let html = frag("<div><span>New member</span></div>");
    assert_eq!(reviewer_details(html.root_element()), ReviewerDetails::default());
}

#[test]
fn location_is_shortest_comma_span_with_letters() {
    let html = frag(
        "<div><span>1,204</span><span>San Francisco, CA</span><span>Oakland, CA</span></div>",
    );
    assert_eq!(
        reviewer_location(html.root_element()).as_deref(),
        Some("Oakland, CA")
    );
}

#[test]
fn rating_reads_integer_portion_in_range() {
    let html = frag(r#"<div><div aria-label="4 star rating"></div></div>"#);
    assert_eq!(reviewer_rating(html.root_element()), Some(4));

    let html = frag(r#"<div><div aria-label="7 star rating"></div></div>"#);
    assert_eq!(reviewer_rating(html.root_element()), None);

    let html = frag(r#"<div><div aria-label="Star rating"></div></div>"#);
    assert_eq!(reviewer_rating(html.root_element()), None);
}

#[test]
fn date_text_prefers_time_element() {
    let html = frag("<div><span>Mar 3, 2024</span><time> </time><time>Jan 5, 2024</time></div>");
    assert_eq!(
        first_match(html.root_element(), DATE_TEXT_STRATEGIES).as_deref(),
        Some("Jan 5, 2024")
    );
}

#[test]
fn date_text_falls_back_to_month_or_year_span() {
    let html = frag("<div><span>Market St</span><span>Updated review</span><span>3/14/2023</span></div>");
    assert_eq!(
        first_match(html.root_element(), DATE_TEXT_STRATEGIES).as_deref(),
        Some("3/14/2023")
    );

    let html = frag("<div><span>Photos</span></div>");
    assert!(first_match(html.root_element(), DATE_TEXT_STRATEGIES).is_none());
}

#[test]
fn body_text_skips_short_paragraphs() {
    let html = frag(
        "<div><p>Useful</p><p>Best tacos in the\n city, hands down.</p><p>Read more</p><p>Will come back again soon.</p></div>",
    );
    assert_eq!(
        body_text(html.root_element()).as_deref(),
        Some("Best tacos in the city, hands down. Will come back again soon.")
    );

    let html = frag("<div><p>Too short here</p></div>");
    assert!(body_text(html.root_element()).is_none());
}

#[test]
fn media_urls_keep_hosted_images_then_videos_deduplicated() {
    let html = frag(
        r#"<div>
             <img src="https://s3-media0.fl.yelpcdn.com/bphoto/a.jpg">
             <img src="https://cdn.example.com/icon.svg">
             <video><source src="https://v.example.com/clip.mp4"></video>
             <img src="https://s3-media0.fl.yelpcdn.com/bphoto/a.jpg">
             <img src="https://s3-media0.fl.yelpcdn.com/bphoto/b.jpg">
           </div>"#,
    );
    assert_eq!(
        media_urls(html.root_element()),
        vec![
            "https://s3-media0.fl.yelpcdn.com/bphoto/a.jpg",
            "https://s3-media0.fl.yelpcdn.com/bphoto/b.jpg",
            "https://v.example.com/clip.mp4",
        ]
    );
}

#[test]
fn reactions_are_independent_and_default_to_zero() {
    let html = frag(
        "<div><button><span>3</span> Helpful</button><button>Thanks</button><button>12 Love this</button><button>1 oh no</button></div>",
    );
    assert_eq!(
        reactions(html.root_element()),
        Reactions {
            helpful: 3,
            thanks: 0,
            love_this: 12,
            oh_no: 1,
        }
    );
}
