//! Fixtures shared by unit tests and, through the `test_utils` feature, by the
//! CLI crate's end-to-end tests.

use crate::model::{City, Review};

#[allow(clippy::too_many_arguments)]
fn city(
    id: &str,
    name: &str,
    province: &str,
    overall_score: f64,
    cost_per_month: &str,
    internet_speed: u32,
    nomads_count: u32,
    quality_score: f64,
    reviews_count: u32,
    description: &str,
) -> City {
    City {
        id: id.to_string(),
        name: name.to_string(),
        province: province.to_string(),
        emoji: None,
        overall_score,
        cost_per_month: cost_per_month.to_string(),
        internet_speed,
        nomads_count,
        cafe_rating: 4.5,
        work_score: 7.0,
        quality_score,
        reviews_count,
        likes_count: None,
        dislikes_count: None,
        description: Some(description.to_string()),
        image_url: None,
    }
}

/// Five cities in a fixed, deliberately unsorted order.
pub fn mock_cities() -> Vec<City> {
    vec![
        city(
            "seoul",
            "서울",
            "서울특별시",
            8.5,
            "2.5~3.5M",
            950,
            1240,
            8.3,
            145,
            "대한민국의 수도이자 최대 도시. 빠른 인터넷과 활발한 노마드 커뮤니티",
        ),
        city(
            "gangneung",
            "강릉",
            "강원도",
            7.8,
            "1.8~2.5M",
            850,
            320,
            7.9,
            78,
            "아름다운 해변과 산이 있는 강원도의 도시",
        ),
        city(
            "jeonju",
            "전주",
            "전라북도",
            7.5,
            "1.8~2.3M",
            820,
            210,
            7.6,
            52,
            "한옥마을과 전통 음식으로 유명한 문화 도시",
        ),
        city(
            "busan",
            "부산",
            "부산광역시",
            8.0,
            "2.2~3.0M",
            920,
            580,
            8.1,
            112,
            "대한민국 제2의 도시. 해변과 항구가 아름다운 도시",
        ),
        city(
            "daegu",
            "대구",
            "대구광역시",
            7.2,
            "1.8~2.2M",
            800,
            150,
            7.3,
            45,
            "저렴한 생활비와 조용한 환경이 특징인 도시",
        ),
    ]
}

fn review(
    id: &str,
    user_id: &str,
    city_id: &str,
    rating: u8,
    created_at: &str,
    username: &str,
) -> Review {
    Review {
        id: id.to_string(),
        user_id: user_id.to_string(),
        city_id: city_id.to_string(),
        title: format!("{} review", username),
        content: format!("{} wrote about {}", username, city_id),
        rating,
        created_at: created_at.to_string(),
        username: username.to_string(),
    }
}

/// Seed reviews: two for seoul (5 and 4), one each for gangneung and busan.
pub fn mock_reviews() -> Vec<Review> {
    vec![
        review("review-1", "user-1", "seoul", 5, "2024-10-20T00:00:00.000Z", "Alice"),
        review("review-2", "user-2", "seoul", 4, "2024-10-18T00:00:00.000Z", "Bob"),
        review("review-3", "user-3", "gangneung", 5, "2024-10-15T00:00:00.000Z", "Charlie"),
        review("review-4", "user-4", "busan", 5, "2024-10-10T00:00:00.000Z", "Diana"),
    ]
}

pub fn names(cities: &[City]) -> Vec<&str> {
    cities.iter().map(|city| city.name.as_str()).collect()
}
