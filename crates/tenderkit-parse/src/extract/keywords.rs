//! Requirement category keyword tables.

/// Requirement categories mined from tender text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Qualification,
    Product,
    Technical,
    Commercial,
    /// Delivery-time markers; feeds the flat requirement scan only.
    Delivery,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Qualification,
        Category::Product,
        Category::Technical,
        Category::Commercial,
        Category::Delivery,
    ];

    /// Keywords marking fragments of this category.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Qualification => QUALIFICATION_KEYWORDS,
            Self::Product => PRODUCT_KEYWORDS,
            Self::Technical => TECHNICAL_KEYWORDS,
            Self::Commercial => COMMERCIAL_KEYWORDS,
            Self::Delivery => DELIVERY_KEYWORDS,
        }
    }
}

pub const QUALIFICATION_KEYWORDS: &[&str] = &[
    "资质",
    "资格",
    "许可证",
    "证书",
    "认证",
    "等级",
    "营业执照",
    "安全生产许可证",
    "承装修试",
];

pub const PRODUCT_KEYWORDS: &[&str] = &[
    "开关柜",
    "配电柜",
    "变压器",
    "箱变",
    "预制舱",
    "高压柜",
    "低压柜",
    "配电箱",
    "母线桥",
    "10kV",
    "35kV",
    "中压",
    "低压",
    "高压",
];

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "技术",
    "规范",
    "标准",
    "参数",
    "性能",
    "防护等级",
    "绝缘等级",
    "额定电流",
    "额定电压",
];

pub const COMMERCIAL_KEYWORDS: &[&str] = &[
    "报价",
    "交货期",
    "付款",
    "质保",
    "售后",
    "验收",
    "培训",
    "服务",
    "合同",
];

pub const DELIVERY_KEYWORDS: &[&str] = &[
    "交货期",
    "工期",
    "交付时间",
    "完成时间",
    "天",
    "个月",
    "日",
    "年",
];
