//! The bundled sample catalog.

use crate::domain::Event;

/// `(id, title, date, time, description, location, category, image label)`
type Row = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

const ROWS: [Row; 8] = [
    (
        "1",
        "React Native Conference 2024",
        "2024-12-15",
        "09:00",
        "Join us for the biggest React Native conference of the year featuring keynote speakers, workshops, and networking opportunities.",
        "San Francisco Convention Center",
        "Technology",
        "FF6B6B/FFFFFF?text=React+Native",
    ),
    (
        "2",
        "Jazz Night at the Blue Note",
        "2024-12-18",
        "20:00",
        "An intimate evening of smooth jazz featuring local and international artists. Perfect for date night or relaxing with friends.",
        "Blue Note Jazz Club, NYC",
        "Music",
        "4ECDC4/FFFFFF?text=Jazz+Night",
    ),
    (
        "3",
        "Food Festival 2024",
        "2024-12-20",
        "11:00",
        "Experience culinary delights from around the world. Sample dishes from top chefs and discover new flavors.",
        "Central Park, New York",
        "Food",
        "FFE66D/000000?text=Food+Festival",
    ),
    (
        "4",
        "Startup Pitch Competition",
        "2024-12-22",
        "14:00",
        "Watch innovative startups pitch their ideas to venture capitalists and industry experts. Network with entrepreneurs.",
        "Tech Hub Downtown",
        "Business",
        "FF8B94/FFFFFF?text=Startup+Pitch",
    ),
    (
        "5",
        "Art Gallery Opening",
        "2024-12-25",
        "18:00",
        "Celebrate the opening of our new contemporary art gallery featuring works from emerging local artists.",
        "Modern Art Museum",
        "Art",
        "A8E6CF/000000?text=Art+Gallery",
    ),
    (
        "6",
        "Marathon 2024",
        "2024-12-28",
        "07:00",
        "Annual city marathon open to runners of all levels. Join thousands in this celebration of fitness and community spirit.",
        "City Center",
        "Sports",
        "FFB3BA/000000?text=Marathon",
    ),
    (
        "7",
        "Book Fair & Author Meet",
        "2024-12-30",
        "10:00",
        "Meet your favorite authors, discover new books, and participate in literary discussions and workshops.",
        "Convention Center Hall A",
        "Literature",
        "DDA0DD/FFFFFF?text=Book+Fair",
    ),
    (
        "8",
        "New Year's Eve Celebration",
        "2024-12-31",
        "21:00",
        "Ring in the new year with live music, fireworks, and celebration. Family-friendly event with activities for all ages.",
        "Riverside Park",
        "Festival",
        "98D8C8/000000?text=NYE+Party",
    ),
];

pub(super) fn sample_events() -> Vec<Event> {
    ROWS.iter()
        .map(|&(id, title, date, time, description, location, category, image)| Event {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            category: category.to_string(),
            image_url: Some(format!("https://via.placeholder.com/300x200/{image}")),
        })
        .collect()
}
