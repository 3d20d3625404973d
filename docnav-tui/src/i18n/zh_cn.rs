//! 中文翻译 (zh-CN)

use super::keys::*;

pub const TRANSLATIONS: Translations = Translations {
    // ========================================================================
    // 通用文本
    // ========================================================================
    common: CommonTexts {
        app_name: "docnav",
        add: "新建",
        delete: "删除",
        export: "导出",
        import: "导入",
        cancel: "取消",
        save: "保存",
        confirm: "确认",
        close: "关闭",
        quit: "退出",
        back: "返回",
        no_data: "暂无数据",
        error: "错误",
    },

    // ========================================================================
    // 键盘提示
    // ========================================================================
    hints: HintTexts {
        keys: KeyNames {
            enter: "Enter",
            esc: "Esc",
            tab: "Tab",
            ctrl_s: "Ctrl+S",
            arrows_lr: "←→",
            arrows_ud: "↑↓",
        },
        actions: ActionTexts {
            navigate: "导航",
            open: "打开",
            switch_panel: "切换面板",
            edit_line: "编辑行",
            newline: "换行",
            switch_option: "切换",
        },
    },

    // ========================================================================
    // 面板
    // ========================================================================
    levels: LevelTexts {
        connections: "连接",
        databases: "数据库",
        collections: "集合",
        documents: "文档",
    },

    editor: EditorTexts {
        title: "文档",
        empty: "选择一个文档以在此查看",
    },

    // ========================================================================
    // 弹窗
    // ========================================================================
    modal: ModalTexts {
        connecting: "正在连接",
        connected: "已连接",
        connect_failed: "连接失败",
        confirm_delete_title: "确认删除",
        confirm_delete_message: "删除",
        confirm_export_title: "确认导出",
        confirm_export_message: "导出",
        invalid_json_title: "JSON 无效",
        export_done_title: "导出完成",
        exported_to: "保存到：",
        exported_count: "已导出：",
        failed_count: "失败：",
        new_database: "新数据库名称",
        first_collection_in: "首个集合，数据库",
        new_collection_in: "新建集合，数据库",
        new_document_in: "新建文档，集合",
        line: "行",
        import_into: "导入 JSON 文件到集合",
    },

    // ========================================================================
    // 状态栏
    // ========================================================================
    status_bar: StatusBarTexts {
        refreshed: "已刷新",
        saved: "文档已保存",
        created: "已创建",
        deleted: "已删除",
        imported: "已导入文档：",
        nothing_selected: "未选中任何项",
        create_unavailable: "连接需在配置文件中添加",
        import_unavailable: "请先打开一个集合再导入",
        identifier_line: "_id 字段不会被保存",
    },

    // ========================================================================
    // 帮助
    // ========================================================================
    help: HelpTexts {
        title: "帮助",
        global_shortcuts: "全局快捷键",
        operation_shortcuts: "操作快捷键",
        editor_shortcuts: "编辑器快捷键",
        close_hint: "按 Esc 关闭帮助",
        actions: HelpActionTexts {
            switch_panel: "切换面板",
            move_up_down: "上下移动",
            open: "打开 / 进入",
            back_cancel: "返回/取消",
            refresh: "刷新",
            help: "帮助",
            quit: "退出",
            add: "新建",
            delete: "删除",
            export: "导出",
            import: "导入 JSON 文件",
            edit_line: "编辑行",
            save: "保存",
        },
    },
};
