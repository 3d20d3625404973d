//! English translations (en-US)

use super::keys::*;

pub const TRANSLATIONS: Translations = Translations {
    // ========================================================================
    // Common
    // ========================================================================
    common: CommonTexts {
        app_name: "docnav",
        add: "Add",
        delete: "Delete",
        export: "Export",
        import: "Import",
        cancel: "Cancel",
        save: "Save",
        confirm: "Confirm",
        close: "Close",
        quit: "Quit",
        back: "Back",
        no_data: "No data",
        error: "Error",
    },

    // ========================================================================
    // Hints
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
            navigate: "Navigate",
            open: "Open",
            switch_panel: "Switch panel",
            edit_line: "Edit line",
            newline: "Newline",
            switch_option: "Switch",
        },
    },

    // ========================================================================
    // Panels
    // ========================================================================
    levels: LevelTexts {
        connections: "Connections",
        databases: "Databases",
        collections: "Collections",
        documents: "Documents",
    },

    editor: EditorTexts {
        title: "Document",
        empty: "Select a document to view it here",
    },

    // ========================================================================
    // Modals
    // ========================================================================
    modal: ModalTexts {
        connecting: "Connecting to",
        connected: "Connected to",
        connect_failed: "Connection failed",
        confirm_delete_title: "Confirm Delete",
        confirm_delete_message: "Delete",
        confirm_export_title: "Confirm Export",
        confirm_export_message: "Export",
        invalid_json_title: "Invalid JSON",
        export_done_title: "Export Complete",
        exported_to: "Saved to:",
        exported_count: "Exported:",
        failed_count: "Failed:",
        new_database: "New database name",
        first_collection_in: "First collection in",
        new_collection_in: "New collection in",
        new_document_in: "New document in",
        line: "Line",
        import_into: "Import JSON file into",
    },

    // ========================================================================
    // Status bar
    // ========================================================================
    status_bar: StatusBarTexts {
        refreshed: "Refreshed",
        saved: "Document saved",
        created: "Created",
        deleted: "Deleted",
        imported: "Imported documents:",
        nothing_selected: "Nothing selected",
        create_unavailable: "Connections are configured in the profiles file",
        import_unavailable: "Open a collection to import documents",
        identifier_line: "The _id field is not saved",
    },

    // ========================================================================
    // Help
    // ========================================================================
    help: HelpTexts {
        title: "Help",
        global_shortcuts: "Global shortcuts",
        operation_shortcuts: "Operation shortcuts",
        editor_shortcuts: "Editor shortcuts",
        close_hint: "Press Esc to close the help",
        actions: HelpActionTexts {
            switch_panel: "Switch panel",
            move_up_down: "Move Up/Down",
            open: "Open / descend",
            back_cancel: "Back/Cancel",
            refresh: "Refresh",
            help: "Help",
            quit: "Quit",
            add: "Add",
            delete: "Delete",
            export: "Export",
            import: "Import JSON file",
            edit_line: "Edit line",
            save: "Save",
        },
    },
};
