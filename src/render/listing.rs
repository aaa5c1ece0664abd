// [library] Escaping for text nodes and double-quoted attributes
use html_escape::{encode_double_quoted_attribute, encode_text};

// [library] Date formatting for the stay range ("Sep 4, 2018")
use time::{macros::format_description, Date};

// [business] Rows produced by the query layer
use crate::db::models::{cents_to_dollars, PropertyListing, ReservationDates, ReservationListing};

use super::scroll::{scroll_observer_script, Visibility, SCROLL_BUTTON_ID};

// [business] Shown instead of a number when a property has no reviews
pub const UNRATED_LABEL: &str = "Not yet rated";

// [business] One property card; `stay` is Some when the card is shown as a reservation
pub fn create_listing(listing: &PropertyListing, stay: Option<&ReservationDates>) -> String {
    let property = &listing.property;

    let stay_html = match stay {
        Some(dates) => format!(
            "\n          <p>{} - {}</p>",
            format_stay_date(dates.start_date),
            format_stay_date(dates.end_date)
        ),
        None => String::new(),
    };

    format!(
        r#"<article class="property-listing">
        <section class="property-listing__preview-image">
          <img src="{}" alt="house">
        </section>
        <section class="property-listing__details">
          <h3 class="property-listing__title">{}</h3>
          <ul class="property-listing__details">
            <li>Number of bedrooms: {}</li>
            <li>Number of bathrooms: {}</li>
            <li>Parking spaces: {}</li>
          </ul>{}
          <footer class="property-listing__footer">
            <div class="property-listing__rating">⭐ {}</div>
            <div class="property-listing__price">${} per-night</div>
          </footer>
        </section>
      </article>"#,
        encode_double_quoted_attribute(&property.thumbnail_photo_url),
        encode_text(&property.title),
        property.number_of_bedrooms,
        property.number_of_bathrooms,
        property.parking_spaces,
        stay_html,
        format_rating(listing.average_rating),
        cents_to_dollars(property.cost_per_night),
    )
}

pub fn create_reservation_listing(reservation: &ReservationListing) -> String {
    create_listing(&reservation.listing, Some(&reservation.dates))
}

// [business] Average rounded to two decimals, out of 5
pub fn format_rating(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{} / 5", (value * 100.0).round() / 100.0),
        None => UNRATED_LABEL.to_string(),
    }
}

fn format_stay_date(date: Date) -> String {
    date.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| date.to_string())
}

// [business] Full page around a set of cards, with the scroll-to-top button
pub fn listings_page(heading: &str, cards: &[String]) -> String {
    let body = if cards.is_empty() {
        r#"<p class="property-listings__empty">No properties found.</p>"#.to_string()
    } else {
        cards.join("\n      ")
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{heading} - LightBnB</title>
</head>
<body>
    <header class="page-header"><h1>{heading}</h1></header>
    <section class="property-listings" id="property-listings">
      {body}
    </section>
    <button id="{id}" class="scroll-button"{hidden} onclick="window.scrollTo(0, 0)">Back to top</button>
    <script>{script}</script>
</body>
</html>"##,
        heading = encode_text(heading),
        body = body,
        id = SCROLL_BUTTON_ID,
        hidden = Visibility::INITIAL.hidden_attribute(),
        script = scroll_observer_script(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Property;
    use time::macros::date;

    fn listing(cost_per_night: i32, average_rating: Option<f64>) -> PropertyListing {
        PropertyListing {
            property: Property {
                id: 1,
                owner_id: 1,
                title: "Speed lamp".to_string(),
                description: "description".to_string(),
                thumbnail_photo_url: "https://images.example.com/1.jpg".to_string(),
                cover_photo_url: "https://images.example.com/1-cover.jpg".to_string(),
                cost_per_night,
                street: "536 Namsub Highway".to_string(),
                city: "Sotboske".to_string(),
                province: "Quebec".to_string(),
                post_code: "28142".to_string(),
                country: "Canada".to_string(),
                parking_spaces: 6,
                number_of_bathrooms: 4,
                number_of_bedrooms: 8,
                active: true,
            },
            average_rating,
        }
    }

    #[test]
    fn test_price_is_shown_in_dollars() {
        let html = create_listing(&listing(15000, Some(4.0)), None);
        assert!(html.contains("$150 per-night"), "{}", html);

        let html = create_listing(&listing(12050, Some(4.0)), None);
        assert!(html.contains("$120.5 per-night"));
    }

    #[test]
    fn test_counts_and_title() {
        let html = create_listing(&listing(100, None), None);
        assert!(html.contains("<h3 class=\"property-listing__title\">Speed lamp</h3>"));
        assert!(html.contains("Number of bedrooms: 8"));
        assert!(html.contains("Number of bathrooms: 4"));
        assert!(html.contains("Parking spaces: 6"));
        assert!(html.contains(r#"<img src="https://images.example.com/1.jpg" alt="house">"#));
    }

    #[test]
    fn test_rating_rounded_to_two_decimals() {
        assert_eq!(format_rating(Some(4.666666)), "4.67 / 5");
        assert_eq!(format_rating(Some(4.0)), "4 / 5");
        assert_eq!(format_rating(Some(3.125)), "3.13 / 5");
        assert_eq!(format_rating(None), UNRATED_LABEL);

        let html = create_listing(&listing(100, None), None);
        assert!(html.contains("⭐ Not yet rated"));
    }

    #[test]
    fn test_dates_only_for_reservations() {
        let stay = ReservationDates {
            start_date: date!(2018 - 09 - 04),
            end_date: date!(2018 - 09 - 26),
        };

        let plain = create_listing(&listing(100, Some(5.0)), None);
        assert!(!plain.contains("<p>"));

        let reserved = create_listing(&listing(100, Some(5.0)), Some(&stay));
        assert!(reserved.contains("<p>Sep 4, 2018 - Sep 26, 2018</p>"), "{}", reserved);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut item = listing(100, None);
        item.property.title = "<script>alert(1)</script>".to_string();
        item.property.thumbnail_photo_url = "x\" onerror=\"alert(1)".to_string();

        let html = create_listing(&item, None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("\" onerror=\""));
    }

    #[test]
    fn test_page_starts_with_hidden_scroll_button() {
        let page = listings_page("Search", &[create_listing(&listing(100, None), None)]);
        assert!(page.contains(r#"<button id="scroll-button" class="scroll-button" hidden"#));
        assert!(page.contains("property-listing__title"));

        let empty = listings_page("My Listings", &[]);
        assert!(empty.contains("No properties found."));
        assert!(empty.contains("<title>My Listings - LightBnB</title>"));
    }
}
