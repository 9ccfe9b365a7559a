//! Product-type keyword table for capability matching.

/// Known product-type terms searched for inside requirement text.
pub const PRODUCT_TYPES: &[&str] = &[
    "开关柜",
    "高压开关柜",
    "低压开关柜",
    "中压开关柜",
    "箱变",
    "箱式变电站",
    "预制舱",
    "组合电器",
    "变压器",
    "互感器",
    "电容器",
    "电抗器",
    "断路器",
    "负荷开关",
    "接地开关",
    "电缆",
    "母线",
    "桥架",
    "避雷器",
    "绝缘子",
    "配电柜",
    "动力配电箱",
    "照明配电箱",
    "电表",
    "计量箱",
    "集中器",
    "采集器",
    "保护装置",
    "继电保护",
    "测控装置",
    "直流",
    "交流",
    "变频器",
    "软启动",
];

/// Collect the product-type terms appearing in any requirement string.
pub fn extract_product_keywords(requirements: &[String]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for req in requirements {
        let req_lower = req.to_lowercase();
        for term in PRODUCT_TYPES {
            if req_lower.contains(term) && !keywords.iter().any(|k| k == term) {
                keywords.push(term.to_string());
            }
        }
    }
    keywords
}
