//! 문서 컬렉션.

use std::fmt;

/// 저장소 컬렉션.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// 사용자 계정
    Users,
    /// 기사
    Articles,
    /// 사용자별 조회 기록
    Views,
    /// 발행처
    Publishers,
    /// 구독 플랜
    Plans,
    /// 결제 기록
    Payments,
    /// 트렌딩 항목
    Trending,
    /// 데모 뉴스
    DemoNews,
}

impl Collection {
    /// 모든 컬렉션.
    pub const ALL: [Collection; 8] = [
        Collection::Users,
        Collection::Articles,
        Collection::Views,
        Collection::Publishers,
        Collection::Plans,
        Collection::Payments,
        Collection::Trending,
        Collection::DemoNews,
    ];

    /// 저장소에서 사용하는 컬렉션 이름.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Articles => "articles",
            Collection::Views => "views",
            Collection::Publishers => "publishers",
            Collection::Plans => "plans",
            Collection::Payments => "payment",
            Collection::Trending => "trending",
            Collection::DemoNews => "demo-news",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
