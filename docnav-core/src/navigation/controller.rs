use std::path::{Path, PathBuf};
use std::sync::Arc;

use docnav_provider::{ConnectionProfile, ExportReport, Gateway, SessionHandle};

use super::breadcrumb::build_title;
use super::level::Level;
use crate::config::ProfileStore;
use crate::editor::{ContentEditor, OpenDocument};
use crate::error::{CoreError, CoreResult};
use crate::export::{collection_dir, database_dir, document_path};
use crate::flows::{ActionTarget, CreateRequest};
use crate::panel::{ItemTarget, ListItem, ListPanel, PanelEvent};

/// 各层已选中的父级名称
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavPath {
    pub connection: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

/// `select` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// 连接层：调用方应启动异步连接
    Connect(ConnectionProfile),
    /// 进入了下一层
    Descended,
    /// 文档已在编辑器中打开
    Opened,
    /// 空列表
    Nothing,
}

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    /// 单个文档导出时为 None
    pub report: Option<ExportReport>,
}

/// 导航状态的唯一持有者
pub struct NavigationController {
    gateway: Arc<dyn Gateway>,
    profiles: ProfileStore,
    session: Option<SessionHandle>,
    level: Level,
    panels: [ListPanel; 4],
    path: NavPath,
    editor: ContentEditor,
}

impl NavigationController {
    pub fn new(gateway: Arc<dyn Gateway>, profiles: ProfileStore) -> Self {
        let mut panels: [ListPanel; 4] = Default::default();
        panels[Level::Connections.index()]
            .set_items(profiles.names().into_iter().map(ListItem::named).collect());

        Self {
            gateway,
            profiles,
            session: None,
            level: Level::Connections,
            panels,
            path: NavPath::default(),
            editor: ContentEditor::new(),
        }
    }

    // ===== 访问器 =====

    pub fn gateway(&self) -> Arc<dyn Gateway> {
        Arc::clone(&self.gateway)
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn path(&self) -> &NavPath {
        &self.path
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn panel(&self, level: Level) -> &ListPanel {
        &self.panels[level.index()]
    }

    pub fn current_panel(&self) -> &ListPanel {
        self.panel(self.level)
    }

    pub fn current_panel_mut(&mut self) -> &mut ListPanel {
        &mut self.panels[self.level.index()]
    }

    pub fn editor(&self) -> &ContentEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ContentEditor {
        &mut self.editor
    }

    /// 按可见行数设置所有面板与编辑器的视口
    pub fn set_viewport(&mut self, list_height: usize, editor_height: usize) {
        for panel in &mut self.panels {
            panel.set_viewport(list_height);
        }
        self.editor.set_viewport(editor_height);
    }

    fn session(&self) -> CoreResult<SessionHandle> {
        self.session.clone().ok_or(CoreError::NotConnected)
    }

    fn database(&self) -> CoreResult<String> {
        self.path.database.clone().ok_or(CoreError::NoSelection)
    }

    fn collection(&self) -> CoreResult<String> {
        self.path.collection.clone().ok_or(CoreError::NoSelection)
    }

    // ===== 导航 =====

    /// 解析当前层的选择；只有 Gateway 调用成功后才修改状态
    pub async fn select(&mut self) -> CoreResult<SelectOutcome> {
        let Some(PanelEvent::Selected { item, .. }) = self.current_panel().select() else {
            return Ok(SelectOutcome::Nothing);
        };

        match (self.level, item.target) {
            (Level::Connections, ItemTarget::Named(name)) => {
                let profile = self.profiles.get(&name)?.clone();
                Ok(SelectOutcome::Connect(profile))
            }
            (Level::Databases, ItemTarget::Named(database)) => {
                let names = self.session()?.list_collections(&database).await?;
                log::debug!("Opened database {database} ({} collections)", names.len());

                self.path.database = Some(database);
                self.panels[Level::Collections.index()].set_items(named_items(names));
                self.level = Level::Collections;
                Ok(SelectOutcome::Descended)
            }
            (Level::Collections, ItemTarget::Named(collection)) => {
                let database = self.database()?;
                let entries = self
                    .session()?
                    .list_documents(&database, &collection)
                    .await?;

                self.path.collection = Some(collection);
                self.panels[Level::Documents.index()]
                    .set_items(entries.into_iter().map(ListItem::document).collect());
                self.editor.close();
                self.level = Level::Documents;
                Ok(SelectOutcome::Descended)
            }
            (Level::Documents, ItemTarget::Document { id, content }) => {
                let document = OpenDocument {
                    database: self.database()?,
                    collection: self.collection()?,
                    id,
                };
                log::debug!("Opened document {}", document.id);
                self.editor.open(document, content);
                Ok(SelectOutcome::Opened)
            }
            _ => Ok(SelectOutcome::Nothing),
        }
    }

    /// 直接连接（不经过异步对话框）
    pub async fn connect(&mut self, profile_name: &str) -> CoreResult<()> {
        let profile = self.profiles.get(profile_name)?.clone();
        let session = self.gateway.connect(&profile).await?;
        self.complete_connection(profile.name, session).await
    }

    /// 接管新会话并加载数据库列表
    pub async fn complete_connection(
        &mut self,
        profile_name: String,
        session: SessionHandle,
    ) -> CoreResult<()> {
        let names = session.list_databases().await?;
        log::info!("Session {profile_name} ready ({} databases)", names.len());

        self.session = Some(session);
        self.path = NavPath {
            connection: Some(profile_name),
            ..NavPath::default()
        };
        self.panels[Level::Databases.index()].set_items(named_items(names));
        self.editor.close();
        self.level = Level::Databases;
        Ok(())
    }

    /// 返回上一层；已在起始层时返回 false
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.level.prev() else {
            return false;
        };

        match self.level {
            Level::Documents => {
                self.editor.close();
                self.path.collection = None;
            }
            Level::Collections => self.path.database = None,
            Level::Databases => {
                self.path.connection = None;
                self.session = None;
            }
            Level::Connections => {}
        }
        self.panels[self.level.index()].clear();
        self.level = prev;
        true
    }

    /// 当前路径中的非空部分
    pub fn breadcrumb_parts(&self) -> Vec<&str> {
        [
            &self.path.connection,
            &self.path.database,
            &self.path.collection,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .collect()
    }

    /// 当前层面板标题
    pub fn title(&self, width: usize) -> String {
        self.title_with(self.level.title(), width)
    }

    /// 使用自定义（已翻译的）基础文本
    pub fn title_with(&self, base: &str, width: usize) -> String {
        build_title(base, &self.breadcrumb_parts(), width)
    }

    /// 重新查询当前层，保留（收缩后的）选择
    pub async fn refresh(&mut self) -> CoreResult<()> {
        let items = match self.level {
            Level::Connections => named_items(self.profiles.names()),
            Level::Databases => named_items(self.session()?.list_databases().await?),
            Level::Collections => {
                let database = self.database()?;
                named_items(self.session()?.list_collections(&database).await?)
            }
            Level::Documents => {
                let (database, collection) = (self.database()?, self.collection()?);
                self.session()?
                    .list_documents(&database, &collection)
                    .await?
                    .into_iter()
                    .map(ListItem::document)
                    .collect()
            }
        };
        self.current_panel_mut().refresh_items(items);
        Ok(())
    }

    // ===== 编辑 =====

    /// 行编辑保存：本地校验 → 提交 → 回读
    pub async fn commit_line_edit(&mut self, line: usize, content: &str) -> CoreResult<()> {
        let document = self.editor.document().cloned().ok_or(CoreError::NoSelection)?;
        let session = self.session()?;

        let candidate = self.editor.apply_line_edit(line, content)?;
        session
            .replace_document(&document.database, &document.collection, &document.id, &candidate)
            .await?;

        let canonical = session
            .get_document(&document.database, &document.collection, &document.id)
            .await?;
        self.editor.reload(canonical);
        log::info!("Saved document {}", document.id);

        if self.level == Level::Documents {
            self.refresh().await?;
        }
        Ok(())
    }

    // ===== 创建 / 删除 =====

    pub async fn create(&mut self, request: CreateRequest) -> CoreResult<()> {
        let session = self.session()?;
        let select: ItemTarget = match request {
            CreateRequest::Database {
                name,
                first_collection,
            } => {
                session.create_database(&name, &first_collection).await?;
                ItemTarget::Named(name)
            }
            CreateRequest::Collection { database, name } => {
                session.create_collection(&database, &name).await?;
                ItemTarget::Named(name)
            }
            CreateRequest::Document {
                database,
                collection,
                json,
            } => {
                let id = session.create_document(&database, &collection, &json).await?;
                ItemTarget::Document {
                    id,
                    content: String::new(),
                }
            }
        };

        self.refresh().await?;
        self.current_panel_mut()
            .select_where(|item| same_target(&item.target, &select));
        Ok(())
    }

    /// 当前选中项对应的删除/导出对象
    pub fn selected_target(&self) -> Option<ActionTarget> {
        let item = self.current_panel().selected_item()?;
        match (self.level, &item.target) {
            (Level::Databases, ItemTarget::Named(name)) => Some(ActionTarget::Database {
                name: name.clone(),
            }),
            (Level::Collections, ItemTarget::Named(name)) => Some(ActionTarget::Collection {
                database: self.path.database.clone()?,
                name: name.clone(),
            }),
            (Level::Documents, ItemTarget::Document { id, .. }) => Some(ActionTarget::Document {
                database: self.path.database.clone()?,
                collection: self.path.collection.clone()?,
                id: id.clone(),
            }),
            _ => None,
        }
    }

    pub async fn delete(&mut self, target: &ActionTarget) -> CoreResult<()> {
        let session = self.session()?;
        match target {
            ActionTarget::Database { name } => session.delete_database(name).await?,
            ActionTarget::Collection { database, name } => {
                session.delete_collection(database, name).await?;
            }
            ActionTarget::Document {
                database,
                collection,
                id,
            } => {
                session.delete_document(database, collection, id).await?;
                if self.editor.document().is_some_and(|d| &d.id == id) {
                    self.editor.close();
                }
            }
        }
        log::info!("Deleted {target}");
        self.refresh().await
    }

    pub async fn delete_selected(&mut self) -> CoreResult<ActionTarget> {
        let target = self.selected_target().ok_or(CoreError::NoSelection)?;
        self.delete(&target).await?;
        Ok(target)
    }

    // ===== 导出 / 导入 =====

    pub async fn export(&self, target: &ActionTarget, base: &Path) -> CoreResult<ExportOutcome> {
        let session = self.session()?;
        let outcome = match target {
            ActionTarget::Document {
                database,
                collection,
                id,
            } => {
                let path = document_path(base, database, collection, id);
                session.export_document(database, collection, id, &path).await?;
                ExportOutcome { path, report: None }
            }
            ActionTarget::Collection { database, name } => {
                let path = collection_dir(base, database, name);
                let report = session.export_collection(database, name, &path).await?;
                ExportOutcome {
                    path,
                    report: Some(report),
                }
            }
            ActionTarget::Database { name } => {
                let path = database_dir(base, name);
                let report = session.export_database(name, &path).await?;
                ExportOutcome {
                    path,
                    report: Some(report),
                }
            }
        };
        log::info!("Exported {target} to {}", outcome.path.display());
        Ok(outcome)
    }

    pub async fn export_selected(&self, base: &Path) -> CoreResult<ExportOutcome> {
        let target = self.selected_target().ok_or(CoreError::NoSelection)?;
        self.export(&target, base).await
    }

    /// 把 JSON 文件导入当前集合，返回插入数量
    pub async fn import_into_current(&mut self, source: &Path) -> CoreResult<usize> {
        if self.level != Level::Documents {
            return Err(CoreError::ValidationError(
                "open a collection before importing".to_string(),
            ));
        }
        let (database, collection) = (self.database()?, self.collection()?);
        let count = self
            .session()?
            .import_documents(&database, &collection, source)
            .await?;
        log::info!("Imported {count} documents into {database}.{collection}");
        self.refresh().await?;
        Ok(count)
    }
}

fn named_items(names: Vec<String>) -> Vec<ListItem> {
    names.into_iter().map(ListItem::named).collect()
}

fn same_target(item: &ItemTarget, wanted: &ItemTarget) -> bool {
    match (item, wanted) {
        (ItemTarget::Named(a), ItemTarget::Named(b)) => a == b,
        (ItemTarget::Document { id: a, .. }, ItemTarget::Document { id: b, .. }) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_controller;
    use docnav_provider::{DocumentId, ProviderError};

    async fn at_users() -> (NavigationController, Arc<crate::test_utils::MockSession>) {
        let (mut nav, session) = create_controller();
        nav.connect("local").await.unwrap();
        nav.current_panel_mut().select_where(|i| i.label == "shop");
        nav.select().await.unwrap();
        nav.current_panel_mut().select_where(|i| i.label == "users");
        assert_eq!(nav.select().await.unwrap(), SelectOutcome::Descended);
        (nav, session)
    }

    async fn open_u1(nav: &mut NavigationController) {
        nav.current_panel_mut().select_first();
        assert_eq!(nav.select().await.unwrap(), SelectOutcome::Opened);
    }

    fn name_line(nav: &NavigationController) -> (usize, String) {
        nav.editor()
            .buffer()
            .lines()
            .iter()
            .enumerate()
            .find(|(_, l)| l.contains("\"name\""))
            .map(|(i, l)| (i, l.clone()))
            .unwrap()
    }

    #[tokio::test]
    async fn connection_select_asks_for_async_connect() {
        let (mut nav, _) = create_controller();
        assert_eq!(nav.current_panel().labels(), vec!["local", "staging"]);

        let outcome = nav.select().await.unwrap();
        assert!(matches!(outcome, SelectOutcome::Connect(p) if p.name == "local"));
        assert_eq!(nav.level(), Level::Connections);
        assert!(!nav.is_connected());
    }

    #[tokio::test]
    async fn drill_down_and_back_restores_selection() {
        let (mut nav, _) = create_controller();
        nav.connect("local").await.unwrap();
        assert_eq!(nav.level(), Level::Databases);
        assert_eq!(nav.current_panel().labels(), vec!["analytics", "shop"]);

        nav.current_panel_mut().cursor_down();
        nav.select().await.unwrap();
        assert_eq!(nav.level(), Level::Collections);
        nav.current_panel_mut().cursor_down();
        let before: Vec<String> = nav
            .current_panel()
            .labels()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(before, vec!["orders", "users"]);

        nav.select().await.unwrap();
        assert_eq!(nav.level(), Level::Documents);
        assert_eq!(nav.current_panel().len(), 3);

        assert!(nav.back());
        assert_eq!(nav.level(), Level::Collections);
        assert_eq!(nav.current_panel().labels(), before);
        assert_eq!(nav.current_panel().selected_index(), 1);
        assert_eq!(nav.path().collection, None);
        assert!(nav.panel(Level::Documents).is_empty());

        assert!(nav.back());
        assert_eq!(nav.current_panel().selected_index(), 1);
        assert!(nav.back());
        assert_eq!(nav.level(), Level::Connections);
        assert!(!nav.is_connected());
        assert!(!nav.back());
        assert_eq!(nav.level(), Level::Connections);
    }

    #[tokio::test]
    async fn failed_descend_leaves_state_unchanged() {
        let (mut nav, session) = create_controller();
        nav.connect("local").await.unwrap();
        session
            .set_fail_next(Some(ProviderError::ConnectionFailed {
                backend: "memory".to_string(),
                detail: "socket closed".to_string(),
            }))
            .await;

        let err = nav.select().await.unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
        assert_eq!(nav.level(), Level::Databases);
        assert_eq!(nav.path().database, None);
    }

    #[tokio::test]
    async fn breadcrumb_follows_the_path() {
        let (nav, _) = at_users().await;
        assert_eq!(nav.breadcrumb_parts(), vec!["local", "shop", "users"]);
        assert_eq!(nav.title(40), "Documents: local > shop > users");
        assert_eq!(nav.title(20), "Documents");
    }

    #[tokio::test]
    async fn selecting_a_document_opens_it_and_back_closes_it() {
        let (mut nav, _) = at_users().await;
        open_u1(&mut nav).await;

        let document = nav.editor().document().unwrap();
        assert_eq!(document.id, DocumentId::from_string("u1"));
        assert!(nav.editor().buffer().text().contains("Alice"));
        assert_eq!(nav.level(), Level::Documents);

        nav.back();
        assert!(!nav.editor().is_open());
    }

    #[tokio::test]
    async fn line_edit_commits_and_refetches() {
        let (mut nav, session) = at_users().await;
        open_u1(&mut nav).await;
        let (line, text) = name_line(&nav);

        nav.commit_line_edit(line, &text.replace("Alice", "Alicia"))
            .await
            .unwrap();

        let replaced = session.replaced().await;
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].0, DocumentId::from_string("u1"));
        assert!(replaced[0].1.contains("Alicia"));

        let stored = session.document("shop", "users", "u1").await.unwrap();
        assert_eq!(stored["name"], "Alicia");
        assert_eq!(stored["_id"], "u1");
        assert!(nav.editor().buffer().text().contains("Alicia"));
        assert_eq!(nav.current_panel().selected_index(), 0);
    }

    #[tokio::test]
    async fn identifier_edits_do_not_change_the_key() {
        let (mut nav, session) = at_users().await;
        open_u1(&mut nav).await;
        let id_line = nav
            .editor()
            .buffer()
            .lines()
            .iter()
            .position(|l| l.contains("\"_id\""))
            .unwrap();
        let edited = nav.editor().buffer().lines()[id_line].replace("u1", "hijacked");

        nav.commit_line_edit(id_line, &edited).await.unwrap();

        assert!(session.document("shop", "users", "u1").await.is_some());
        assert!(session.document("shop", "users", "hijacked").await.is_none());
        assert!(!nav.editor().buffer().text().contains("hijacked"));
    }

    #[tokio::test]
    async fn invalid_line_edit_is_rejected_locally() {
        let (mut nav, session) = at_users().await;
        open_u1(&mut nav).await;
        let original = nav.editor().buffer().text().to_string();
        let (line, _) = name_line(&nav);

        let err = nav.commit_line_edit(line, "not json").await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidJson(_)));
        assert_eq!(nav.editor().buffer().text(), original);
        assert!(session.replaced().await.is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_the_edit_on_screen() {
        let (mut nav, session) = at_users().await;
        open_u1(&mut nav).await;
        let (line, text) = name_line(&nav);
        session
            .set_fail_next(Some(ProviderError::PermissionDenied {
                backend: "memory".to_string(),
                raw_message: None,
            }))
            .await;

        let err = nav
            .commit_line_edit(line, &text.replace("Alice", "Alicia"))
            .await
            .unwrap_err();

        assert!(err.is_expected());
        assert!(nav.editor().buffer().text().contains("Alicia"));
        let stored = session.document("shop", "users", "u1").await.unwrap();
        assert_eq!(stored["name"], "Alice");
    }

    #[tokio::test]
    async fn deleting_the_last_document_clamps_selection() {
        let (mut nav, session) = at_users().await;
        nav.current_panel_mut().select_last();
        assert_eq!(nav.current_panel().selected_index(), 2);

        let target = nav.delete_selected().await.unwrap();

        assert!(matches!(target, ActionTarget::Document { ref id, .. } if id.to_string() == "u3"));
        assert_eq!(nav.current_panel().len(), 2);
        assert_eq!(nav.current_panel().selected_index(), 1);
        assert!(session.document("shop", "users", "u3").await.is_none());
    }

    #[tokio::test]
    async fn deleting_the_open_document_closes_the_editor() {
        let (mut nav, _) = at_users().await;
        open_u1(&mut nav).await;
        nav.delete_selected().await.unwrap();
        assert!(!nav.editor().is_open());
    }

    #[tokio::test]
    async fn create_database_selects_it() {
        let (mut nav, _) = create_controller();
        nav.connect("local").await.unwrap();

        nav.create(CreateRequest::Database {
            name: "crm".to_string(),
            first_collection: "leads".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(nav.current_panel().labels(), vec!["analytics", "crm", "shop"]);
        assert_eq!(nav.current_panel().selected_index(), 1);
    }

    #[tokio::test]
    async fn create_document_selects_the_new_id() {
        let (mut nav, session) = at_users().await;

        nav.create(CreateRequest::Document {
            database: "shop".to_string(),
            collection: "users".to_string(),
            json: r#"{"name": "Dave"}"#.to_string(),
        })
        .await
        .unwrap();

        assert_eq!(nav.current_panel().len(), 4);
        assert_eq!(nav.current_panel().selected_index(), 3);
        assert!(session.document("shop", "users", "m1").await.is_some());
    }

    #[tokio::test]
    async fn export_document_writes_to_deterministic_path() {
        let (mut nav, _) = at_users().await;
        nav.current_panel_mut().cursor_down();
        let dir = tempfile::tempdir().unwrap();

        let outcome = nav.export_selected(dir.path()).await.unwrap();

        assert_eq!(outcome.path, dir.path().join("shop").join("users").join("u2.json"));
        assert!(outcome.report.is_none());
        let written = std::fs::read_to_string(&outcome.path).unwrap();
        assert!(written.contains("Bob"));
    }

    #[tokio::test]
    async fn export_database_reports_counts() {
        let (mut nav, _) = create_controller();
        nav.connect("local").await.unwrap();
        nav.current_panel_mut().select_where(|i| i.label == "shop");
        let dir = tempfile::tempdir().unwrap();

        let outcome = nav.export_selected(dir.path()).await.unwrap();

        let report = outcome.report.unwrap();
        assert_eq!(report.exported_count, 5);
        assert_eq!(report.failed_count, 0);
        assert!(dir.path().join("shop").join("orders").join("o1.json").exists());
    }

    #[tokio::test]
    async fn import_requires_an_open_collection() {
        let (mut nav, _) = create_controller();
        nav.connect("local").await.unwrap();
        let err = nav
            .import_into_current(Path::new("docs.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn import_refreshes_the_document_list() {
        let (mut nav, _) = at_users().await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("more.json");
        std::fs::write(&file, r#"[{"name":"Eve"},{"name":"Frank"}]"#).unwrap();

        assert_eq!(nav.import_into_current(&file).await.unwrap(), 2);
        assert_eq!(nav.current_panel().len(), 5);
    }

    #[tokio::test]
    async fn selection_at_connections_has_no_target() {
        let (nav, _) = create_controller();
        assert!(nav.selected_target().is_none());
    }
}
