//! Generic filtering over district entities.
//!
//! Each filter record from `scs_conecta_engine_models` implements
//! [`EntityFilter`] for the entity it selects, and [`select`] applies any of
//! them while preserving input order.

use scs_conecta_district_models::{
    Business, Event, Post, SafetyAlert, Tagged as _, VacantProperty, Zoned as _,
};
use scs_conecta_engine_models::filter::tags_intersect;
use scs_conecta_engine_models::{
    AlertFilter, BusinessFilter, EventFilter, PostQuery, PostSort, PropertyFilter,
};

/// Bonus added to a pinned post's net votes in popular order.
pub const PINNED_BONUS: i64 = 1000;

/// A conjunction of predicates over one entity kind.
pub trait EntityFilter<T> {
    /// Whether `item` satisfies every applied predicate.
    fn accepts(&self, item: &T) -> bool;
}

impl EntityFilter<Event> for EventFilter {
    fn accepts(&self, item: &Event) -> bool {
        self.zone.matches(&item.zone)
            && self.category.matches(&item.category)
            && self.highlight.matches(&item.highlight)
            && tags_intersect(&self.audience, item.tags())
            && tags_intersect(&self.support_needs, &item.support_needs)
            && self
                .min_start_hour
                .is_none_or(|hour| item.start_hour() >= hour)
    }
}

impl EntityFilter<Business> for BusinessFilter {
    fn accepts(&self, item: &Business) -> bool {
        self.zone.matches(&item.zone)
            && self.kind.matches(&item.kind)
            && self.status.matches(&item.status)
            && self
                .open_at_night
                .is_none_or(|flag| item.open_at_night == flag)
    }
}

impl EntityFilter<SafetyAlert> for AlertFilter {
    fn accepts(&self, item: &SafetyAlert) -> bool {
        self.zone.matches(&item.zone)
            && self.kind.matches(&item.kind)
            && self.status.matches(&item.status)
    }
}

impl EntityFilter<VacantProperty> for PropertyFilter {
    fn accepts(&self, item: &VacantProperty) -> bool {
        self.zone.matches(&item.zone)
            && self
                .min_potential
                .is_none_or(|min| item.reactivation_potential >= min)
            && tags_intersect(&self.uses, item.tags())
    }
}

impl EntityFilter<Post> for PostQuery {
    fn accepts(&self, item: &Post) -> bool {
        self.category.matches(&item.category)
            && self.zone.matches_opt(item.zone())
            && self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .is_none_or(|term| post_mentions(item, term))
    }
}

fn post_mentions(post: &Post, term: &str) -> bool {
    let needle = term.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.content.to_lowercase().contains(&needle)
        || post
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Returns the items accepted by `filter`, in input order.
///
/// Accepts any iterator of references, so an already filtered `Vec<&T>` can
/// be filtered again with `.iter().copied()`.
pub fn select<'a, T: 'a, F: EntityFilter<T> + ?Sized>(
    items: impl IntoIterator<Item = &'a T>,
    filter: &F,
) -> Vec<&'a T> {
    let selected: Vec<&'a T> = items
        .into_iter()
        .filter(|item| filter.accepts(item))
        .collect();
    log::debug!("Filter selected {} item(s)", selected.len());
    selected
}

/// Popular-order score: net votes, plus [`PINNED_BONUS`] when pinned.
#[must_use]
pub fn popularity(post: &Post) -> i64 {
    post.net_votes() + if post.pinned { PINNED_BONUS } else { 0 }
}

/// Orders forum posts in place. Pinned posts always precede unpinned ones;
/// ties keep their input order.
pub fn sort_posts(posts: &mut [&Post], sort: PostSort) {
    match sort {
        PostSort::Popular => {
            posts.sort_by(|a, b| {
                b.pinned
                    .cmp(&a.pinned)
                    .then_with(|| popularity(b).cmp(&popularity(a)))
            });
        }
        PostSort::Recent => {
            posts.sort_by(|a, b| {
                b.pinned
                    .cmp(&a.pinned)
                    .then_with(|| b.timestamp.cmp(&a.timestamp))
            });
        }
    }
}

/// Filters and orders forum posts per `query`.
#[must_use]
pub fn query_posts<'a>(posts: &'a [Post], query: &PostQuery) -> Vec<&'a Post> {
    let mut selected = select(posts, query);
    sort_posts(&mut selected, query.sort);
    selected
}

#[cfg(test)]
mod tests {
    use scs_conecta_district_models::{
        BusinessKind, BusinessStatus, EventCategory, ReactivationPotential, ZoneId,
    };
    use scs_conecta_engine_models::FilterValue;

    use super::*;
    use crate::testdata::{business, event, post, property, tags};

    fn sample_events() -> Vec<Event> {
        let mut a = event("evt-001", "scs-1", "2025-12-20", "19:00", "23:00");
        a.audience = tags(&["women", "youth"]);
        a.support_needs = tags(&["security", "lighting"]);
        let mut b = event("evt-002", "scs-2", "2025-12-21", "10:00", "14:00");
        b.category = EventCategory::Commercial;
        b.audience = tags(&["families"]);
        let c = event("evt-003", "scs-1", "2025-12-22", "18:00", "22:00");
        vec![a, b, c]
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let events = sample_events();
        let ids: Vec<_> = select(&events, &EventFilter::default())
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["evt-001", "evt-002", "evt-003"]);
    }

    #[test]
    fn event_filter_is_a_conjunction() {
        let events = sample_events();
        let filter = EventFilter {
            zone: FilterValue::Only(ZoneId::from("scs-1")),
            min_start_hour: Some(18),
            ..EventFilter::default()
        };
        let ids: Vec<_> = select(&events, &filter)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["evt-001", "evt-003"]);

        let filter = EventFilter {
            category: FilterValue::Only(EventCategory::Commercial),
            min_start_hour: Some(18),
            ..EventFilter::default()
        };
        assert!(select(&events, &filter).is_empty());
    }

    #[test]
    fn tag_filters_need_one_shared_tag() {
        let events = sample_events();
        let filter = EventFilter {
            audience: tags(&["youth", "elderly"]),
            ..EventFilter::default()
        };
        let selected = select(&events, &filter);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "evt-001");

        let filter = EventFilter {
            support_needs: tags(&["lighting"]),
            ..EventFilter::default()
        };
        assert_eq!(select(&events, &filter).len(), 1);
    }

    #[test]
    fn unknown_zone_filters_to_empty() {
        let events = sample_events();
        let filter = EventFilter {
            zone: FilterValue::parse_lenient("scs-99"),
            ..EventFilter::default()
        };
        assert!(select(&events, &filter).is_empty());
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let events = sample_events();
        let filter = EventFilter::nighttime(18);
        let once = select(&events, &filter);
        let twice = select(once.iter().copied(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn business_filter_matches_flags() {
        let mut bar = business("b-1", "scs-1", BusinessKind::Bar, BusinessStatus::Active);
        bar.open_at_night = true;
        let shop = business("b-2", "scs-1", BusinessKind::Service, BusinessStatus::Active);
        let empty = business("b-3", "scs-2", BusinessKind::Vacant, BusinessStatus::Vacant);
        let businesses = vec![bar, shop, empty];

        let night = BusinessFilter {
            open_at_night: Some(true),
            ..BusinessFilter::default()
        };
        assert_eq!(select(&businesses, &night)[0].id, "b-1");

        let vacant = BusinessFilter {
            status: FilterValue::Only(BusinessStatus::Vacant),
            ..BusinessFilter::default()
        };
        assert_eq!(select(&businesses, &vacant)[0].id, "b-3");
    }

    #[test]
    fn property_filter_uses_minimum_potential() {
        let mut low = property("v-1", "scs-1", ReactivationPotential::Low);
        low.suggested_uses = tags(&["gallery"]);
        let high = property("v-2", "scs-1", ReactivationPotential::High);
        let top = property("v-3", "scs-2", ReactivationPotential::VeryHigh);
        let properties = vec![low, high, top];

        let filter = PropertyFilter {
            min_potential: Some(ReactivationPotential::High),
            ..PropertyFilter::default()
        };
        let ids: Vec<_> = select(&properties, &filter)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["v-2", "v-3"]);

        let filter = PropertyFilter {
            uses: tags(&["gallery"]),
            ..PropertyFilter::default()
        };
        assert_eq!(select(&properties, &filter)[0].id, "v-1");
    }

    #[test]
    fn pinned_posts_come_first_in_both_orders() {
        let posts = vec![
            post("p-1", false, 50, 0, "2025-12-19T10:00:00"),
            post("p-2", true, 0, 3, "2025-12-01T10:00:00"),
            post("p-3", false, 10, 1, "2025-12-20T09:00:00"),
        ];

        let popular = query_posts(&posts, &PostQuery::default());
        let ids: Vec<_> = popular.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-1", "p-3"]);
        assert_eq!(popularity(popular[0]), 997);

        let recent = query_posts(
            &posts,
            &PostQuery {
                sort: PostSort::Recent,
                ..PostQuery::default()
            },
        );
        let ids: Vec<_> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-3", "p-1"]);
    }

    #[test]
    fn post_search_covers_title_content_and_tags() {
        let mut lighting = post("p-1", false, 0, 0, "2025-12-19T10:00:00");
        lighting.content = "The street LIGHTS are out again".to_string();
        let mut tagged = post("p-2", false, 0, 0, "2025-12-19T11:00:00");
        tagged.tags = tags(&["lights"]);
        let other = post("p-3", false, 0, 0, "2025-12-19T12:00:00");
        let posts = vec![lighting, tagged, other];

        let query = PostQuery {
            search: Some("lights".to_string()),
            sort: PostSort::Recent,
            ..PostQuery::default()
        };
        let ids: Vec<_> = query_posts(&posts, &query)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
    }

    #[test]
    fn district_wide_posts_fail_a_zone_filter() {
        let mut zoned = post("p-1", false, 0, 0, "2025-12-19T10:00:00");
        zoned.zone = Some(ZoneId::from("scs-3"));
        let posts = vec![zoned, post("p-2", false, 0, 0, "2025-12-19T10:00:00")];
        let query = PostQuery {
            zone: FilterValue::Only(ZoneId::from("scs-3")),
            ..PostQuery::default()
        };
        assert_eq!(query_posts(&posts, &query).len(), 1);
    }
}
