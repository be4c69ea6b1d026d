//! 端口表格
//!
//! 列表视图中的结果表。行通过 [`RowHandle`] 引用；详情面板打开时行被“摘下”，
//! 原位置换成占位槽 [`TableSlot::Detail`]，关闭时原样放回。

use crate::types::SearchBlock;

/// 行句柄（行在本次加载中的序号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(usize);

impl RowHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 表格的显示槽
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSlot {
    /// 普通行
    Row(RowHandle),
    /// 占位：该行已被摘下，位置由详情面板占用
    Detail(RowHandle),
}

impl TableSlot {
    pub fn handle(self) -> RowHandle {
        match self {
            Self::Row(h) | Self::Detail(h) => h,
        }
    }
}

/// 主机名来源：某一列，或整张表共用的字面值（单台交换机的端口列表）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostColumn {
    Column(usize),
    Literal(String),
}

/// 列含义描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub host: HostColumn,
    pub portname: usize,
    pub cross_connect: Option<usize>,
    pub outlet: Option<usize>,
}

impl ColumnMap {
    /// 从结果列推导；没有端口列或无法确定主机时返回 `None`
    pub fn from_fields(fields: &[String], host: Option<&str>) -> Option<Self> {
        let position = |name: &str| fields.iter().position(|f| f == name);

        let host = match (position("host"), host) {
            (Some(col), _) => HostColumn::Column(col),
            (None, Some(literal)) => HostColumn::Literal(literal.to_string()),
            (None, None) => return None,
        };
        Some(Self {
            host,
            portname: position("portname")?,
            cross_connect: position("cp"),
            outlet: position("outlet"),
        })
    }
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRow {
    cells: Vec<String>,
}

impl PortRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map_or("", String::as_str)
    }

    fn host<'a>(&'a self, columns: &'a ColumnMap) -> &'a str {
        match &columns.host {
            HostColumn::Column(col) => self.cell(*col),
            HostColumn::Literal(host) => host,
        }
    }
}

/// 端口表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortTable {
    fields: Vec<String>,
    rows: Vec<PortRow>,
    slots: Vec<TableSlot>,
}

impl PortTable {
    pub fn new(fields: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self {
            fields,
            ..Self::default()
        };
        table.replace_rows(rows);
        table
    }

    pub fn from_search(block: &SearchBlock) -> Self {
        Self::new(block.fields.clone(), block.rows())
    }

    /// 用新数据替换全部行（刷新）
    pub fn replace_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows.into_iter().map(PortRow::new).collect();
        self.slots = (0..self.rows.len())
            .map(|i| TableSlot::Row(RowHandle(i)))
            .collect();
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn slots(&self) -> &[TableSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 第 `index` 个显示槽对应的行句柄
    pub fn handle_at(&self, index: usize) -> Option<RowHandle> {
        self.slots.get(index).map(|s| s.handle())
    }

    /// 读取行，无论它当前是否被摘下
    pub fn row(&self, handle: RowHandle) -> Option<&PortRow> {
        self.rows.get(handle.0)
    }

    /// 行是否可以打开详情面板
    pub fn is_detail_capable(&self, handle: RowHandle, columns: &ColumnMap) -> bool {
        self.row(handle).is_some_and(|row| {
            !row.cell(columns.portname).is_empty() && !row.host(columns).is_empty()
        })
    }

    /// 行的 (host, portname)
    pub fn key(&self, handle: RowHandle, columns: &ColumnMap) -> Option<(String, String)> {
        let row = self.row(handle)?;
        Some((
            row.host(columns).to_string(),
            row.cell(columns.portname).to_string(),
        ))
    }

    pub fn host<'a>(&'a self, handle: RowHandle, columns: &'a ColumnMap) -> Option<&'a str> {
        self.row(handle).map(|row| row.host(columns))
    }

    pub fn is_detached(&self, handle: RowHandle) -> bool {
        self.slots.contains(&TableSlot::Detail(handle))
    }

    /// 摘下一行，原位置换成占位槽
    pub fn detach(&mut self, handle: RowHandle) -> bool {
        self.swap_slot(TableSlot::Row(handle), TableSlot::Detail(handle))
    }

    /// 把摘下的行放回原位
    pub fn reattach(&mut self, handle: RowHandle) -> bool {
        self.swap_slot(TableSlot::Detail(handle), TableSlot::Row(handle))
    }

    fn swap_slot(&mut self, from: TableSlot, to: TableSlot) -> bool {
        match self.slots.iter_mut().find(|s| **s == from) {
            Some(slot) => {
                *slot = to;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn column_map_uses_literal_host_when_column_missing() {
        let map = ColumnMap::from_fields(&fields(&["portname", "cp", "descr"]), Some("brrsw01"))
            .unwrap();
        assert_eq!(map.host, HostColumn::Literal("brrsw01".into()));
        assert_eq!(map.cross_connect, Some(1));
        assert_eq!(map.outlet, None);

        assert!(ColumnMap::from_fields(&fields(&["portname"]), None).is_none());
        assert!(ColumnMap::from_fields(&fields(&["host", "descr"]), None).is_none());
    }

    #[test]
    fn detach_and_reattach_keep_position() {
        let mut table = PortTable::new(
            fields(&["host", "portname"]),
            vec![
                vec!["sw1".into(), "p1".into()],
                vec!["sw1".into(), "p2".into()],
                vec!["sw1".into(), "p3".into()],
            ],
        );
        let handle = table.handle_at(1).unwrap();
        let before = table.clone();

        assert!(table.detach(handle));
        assert_eq!(table.slots()[1], TableSlot::Detail(handle));
        assert!(!table.detach(handle));

        assert!(table.reattach(handle));
        assert_eq!(table, before);
    }

    #[test]
    fn rows_without_port_are_not_detail_capable() {
        let table = PortTable::new(
            fields(&["host", "portname"]),
            vec![vec!["sw1".into(), String::new()], vec!["sw1".into(), "p2".into()]],
        );
        let map = ColumnMap::from_fields(table.fields(), None).unwrap();
        assert!(!table.is_detail_capable(RowHandle(0), &map));
        assert!(table.is_detail_capable(RowHandle(1), &map));
        assert_eq!(
            table.key(RowHandle(1), &map),
            Some(("sw1".to_string(), "p2".to_string()))
        );
    }

    #[test]
    fn host_falls_back_to_literal_from_column_map() {
        let table = PortTable::new(
            fields(&["portname", "descr"]),
            vec![vec!["ge1/0/2".into(), "uplink".into()]],
        );
        let map = ColumnMap::from_fields(table.fields(), Some("brrsw01")).unwrap();
        let handle = table.handle_at(0).unwrap();

        assert_eq!(table.host(handle, &map), Some("brrsw01"));
        assert!(table.is_detail_capable(handle, &map));
    }
}
