use serde::Serialize;

/// 导航层级，按深度排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    Connections,
    Databases,
    Collections,
    Documents,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Connections,
        Level::Databases,
        Level::Collections,
        Level::Documents,
    ];

    pub fn index(self) -> usize {
        match self {
            Level::Connections => 0,
            Level::Databases => 1,
            Level::Collections => 2,
            Level::Documents => 3,
        }
    }

    /// 下一层；Documents 没有更深的层级
    pub fn next(self) -> Option<Level> {
        match self {
            Level::Connections => Some(Level::Databases),
            Level::Databases => Some(Level::Collections),
            Level::Collections => Some(Level::Documents),
            Level::Documents => None,
        }
    }

    /// 上一层；Connections 是起始层
    pub fn prev(self) -> Option<Level> {
        match self {
            Level::Connections => None,
            Level::Databases => Some(Level::Connections),
            Level::Collections => Some(Level::Databases),
            Level::Documents => Some(Level::Collections),
        }
    }

    pub fn is_initial(self) -> bool {
        self == Level::Connections
    }

    /// 面板标题的基础文本
    pub fn title(self) -> &'static str {
        match self {
            Level::Connections => "Connections",
            Level::Databases => "Databases",
            Level::Collections => "Collections",
            Level::Documents => "Documents",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_chain_in_both_directions() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            if let Some(next) = level.next() {
                assert_eq!(next.prev(), Some(*level));
            }
        }
        assert!(Level::Connections.is_initial());
        assert_eq!(Level::Connections.prev(), None);
        assert_eq!(Level::Documents.next(), None);
    }
}
