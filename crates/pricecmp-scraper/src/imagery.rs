//! Stock product imagery for synthetic records.
//!
//! Selection is deterministic: the same query and platform always map to the
//! same photo.

use pricecmp_core::Platform;

const PHOTO_BASE: &str = "https://images.unsplash.com/photo-";
const PHOTO_PARAMS: &str = "?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=400&q=80";
const GENERIC_PLACEHOLDER: &str = "https://via.placeholder.com/400x400.png?text=Product+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Sports,
    Books,
    Default,
}

impl Category {
    /// Keyword table, checked in order; the first category with a keyword
    /// contained in the query wins.
    const KEYWORDS: [(Category, &'static [&'static str]); 5] = [
        (
            Category::Electronics,
            &[
                "phone",
                "laptop",
                "computer",
                "electronic",
                "headphones",
                "iphone",
                "ipad",
                "macbook",
            ],
        ),
        (
            Category::Fashion,
            &[
                "shoes", "shirt", "dress", "fashion", "clothing", "watch", "bag", "jacket",
            ],
        ),
        (
            Category::Home,
            &["furniture", "home", "kitchen", "decor", "chair", "table"],
        ),
        (
            Category::Sports,
            &["sport", "fitness", "gym", "ball", "running", "exercise"],
        ),
        (
            Category::Books,
            &["book", "novel", "magazine", "education"],
        ),
    ];

    #[must_use]
    pub fn classify(query: &str) -> Self {
        let lowered = query.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
            .map_or(Category::Default, |(category, _)| *category)
    }

    fn photos(self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &[
                "1560472354-a5b8c6ce0a40",
                "1587831990-6e1b4d12ebcd",
                "1565036522-5c35cd6c7936",
                "1542751371-adc38448a05e",
                "1585776245937-3f7f8c4c1b4c",
            ],
            Category::Fashion => &[
                "1441986300917-64674bd600d8",
                "1434389677669-e08b4cac3105",
                "1485462537746-965f33f7f6a7",
                "1533060836206-3c3c4a2d5ae0",
                "1566479179817-9a2e6d30c48f",
            ],
            Category::Home => &[
                "1586023492031-74992e9b7b2e",
                "1558618666-fca92c82b9c4",
                "1571171637578-61ca2f908c9",
                "1493663284031-2e166c293af2",
                "1555041469-a586c61ea9bc",
            ],
            Category::Sports => &[
                "1571008887538-b36bb32f4571",
                "1571019613454-1cb2f99b2d8b",
                "1431440869236-80c4e76f1f8a",
                "1578662996442-6cf58ac0e7b4",
                "1544966503-7ad5dcb9b3b9",
            ],
            Category::Books => &[
                "1481627834876-b7833e8f5570",
                "1512820790803-83ca734da794",
                "1507003211169-0a1dd7bf7510",
                "1524995997946-a2c2e315a42f",
            ],
            Category::Default => &[
                "1556909114-f6e7ad7d3136",
                "1505740420928-5e560c06d30e",
                "1472851294608-c4d3c4e10ca1",
                "1534452203-72d0b4056e09",
                "1563013544-824ae1b704d3",
            ],
        }
    }
}

/// Stock photo URL for `query` as listed on `platform`.
#[must_use]
pub fn product_image(query: &str, platform: Platform) -> String {
    let photos = Category::classify(query).photos();
    let key = format!("{query}{}", platform.name());
    let index = string_hash(&key) as usize % photos.len();
    format!("{PHOTO_BASE}{}{PHOTO_PARAMS}", photos[index])
}

/// CDN-style placeholder image for a platform name; names outside the
/// registry get a generic placeholder.
#[must_use]
pub fn platform_placeholder(platform_name: &str) -> &'static str {
    match Platform::from_name(platform_name) {
        Some(Platform::Ebay) => "https://i.ebayimg.com/images/g/placeholder/s-l400.jpg",
        Some(Platform::AmazonUs) => "https://m.media-amazon.com/images/I/placeholder.jpg",
        Some(Platform::Target) => "https://target.scene7.com/is/image/Target/placeholder",
        Some(Platform::StockX) => "https://images.stockx.com/images/placeholder.jpg",
        Some(Platform::Farfetch) => "https://cdn-images.farfetch-contents.com/placeholder.jpg",
        None => GENERIC_PLACEHOLDER,
    }
}

/// 31-multiplier rolling hash over UTF-16 code units in wrapping 32-bit
/// arithmetic, returned as an absolute value.
fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}
