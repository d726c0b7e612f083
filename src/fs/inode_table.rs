use crate::disk::BlockIndex;

/// 目录项：文件名、大小（字节）、数据块链的首块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InodeEntry {
    pub name: String,
    pub size: usize,
    pub first_block: Option<BlockIndex>, // size == 0 时为 None
}

impl InodeEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            size: 0,
            first_block: None,
        }
    }

    /// 清空内容，保留文件名
    pub fn truncate(&mut self) {
        self.size = 0;
        self.first_block = None;
    }
}

/// 定长 inode 表，下标即 inode 编号
#[derive(Debug)]
pub struct InodeTable {
    slots: Vec<Option<InodeEntry>>,
}

impl InodeTable {
    pub fn new(total_inodes: usize) -> Self {
        Self {
            slots: vec![None; total_inodes],
        }
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(entry) if entry.name == name))
    }

    pub fn get(&self, index: usize) -> Option<&InodeEntry> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut InodeEntry> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// 放进编号最小的空槽，表满时返回 None。
    /// 文件名唯一性由调用方先用 [`InodeTable::find`] 检查。
    pub fn alloc_inode(&mut self, entry: InodeEntry) -> Option<usize> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(entry);
        Some(index)
    }

    pub fn free_inode(&mut self, index: usize) -> Option<InodeEntry> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// 按槽位升序遍历已占用的 inode
    pub fn iter(&self) -> impl Iterator<Item = (usize, &InodeEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|entry| (i, entry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_lowest_free_slot() {
        let mut table = InodeTable::new(3);
        assert_eq!(table.alloc_inode(InodeEntry::new("a")), Some(0));
        assert_eq!(table.alloc_inode(InodeEntry::new("b")), Some(1));

        table.free_inode(0);
        assert_eq!(table.alloc_inode(InodeEntry::new("c")), Some(0));
        assert_eq!(table.find("c"), Some(0));
        assert_eq!(table.find("a"), None);
    }

    #[test]
    fn full_table_rejects_allocation() {
        let mut table = InodeTable::new(1);
        table.alloc_inode(InodeEntry::new("a")).unwrap();
        assert_eq!(table.alloc_inode(InodeEntry::new("b")), None);
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut table = InodeTable::new(4);
        table.alloc_inode(InodeEntry::new("a"));
        table.alloc_inode(InodeEntry::new("b"));
        table.alloc_inode(InodeEntry::new("c"));
        table.free_inode(1);

        let names: Vec<_> = table.iter().map(|(i, e)| (i, e.name.as_str())).collect();
        assert_eq!(names, vec![(0, "a"), (2, "c")]);
    }

    #[test]
    fn truncate_keeps_name() {
        let mut entry = InodeEntry::new("log");
        entry.size = 300;
        entry.first_block = Some(4);
        entry.truncate();
        assert_eq!(entry, InodeEntry::new("log"));
    }
}
