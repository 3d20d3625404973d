//! 内容面板消息

/// 内容面板相关消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMessage {
    /// 上一行
    SelectPrevious,
    /// 下一行
    SelectNext,
    /// 第一行
    SelectFirst,
    /// 最后一行
    SelectLast,
    /// 编辑当前行
    Edit,

    /// 新建（数据库 / 集合 / 文档，取决于当前层）
    Add,
    /// 删除选中项
    Delete,
    /// 导入 JSON 文件到当前集合
    Import,
    /// 导出选中项
    Export,
}
