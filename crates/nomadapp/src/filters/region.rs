/// A named group of provinces selectable as a single filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub key: &'static str,
    pub label: &'static str,
    pub provinces: &'static [&'static str],
}

pub const REGIONS: &[Region] = &[
    Region {
        key: "seoul",
        label: "서울/경기",
        provinces: &["서울특별시", "경기도"],
    },
    Region {
        key: "gangwon",
        label: "강원",
        provinces: &["강원도"],
    },
    Region {
        key: "jeonlla",
        label: "전라",
        provinces: &["전라북도", "전라남도", "광주광역시"],
    },
    Region {
        key: "gyeongsan",
        label: "경상",
        provinces: &["부산광역시", "대구광역시", "경상북도", "경상남도"],
    },
    Region {
        key: "chungcheong",
        label: "충청",
        provinces: &["충청북도", "충청남도", "대전광역시"],
    },
    Region {
        key: "jeju",
        label: "제주",
        provinces: &["제주특별자치도"],
    },
];

pub fn region(key: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|region| region.key == key)
}

/// Provinces covered by a region key. Unknown keys cover nothing.
pub fn provinces_for(key: &str) -> &'static [&'static str] {
    region(key).map(|region| region.provinces).unwrap_or(&[])
}
