//! 帐号列表操作
//!
//! 帐号列表按插入顺序保存，本层不强制 UID 唯一，查找时取第一个匹配项

use super::types::BaiduAccount;
use crate::error::{ConfigError, Result};

/// 按 UID 查找帐号（第一个匹配项）
pub fn find_by_uid(accounts: &[BaiduAccount], uid: u64) -> Option<&BaiduAccount> {
    accounts.iter().find(|account| account.uid == uid)
}

/// 添加或替换帐号
///
/// 已存在相同 UID 时原地替换第一个匹配项，否则追加到末尾
///
/// # Returns
/// - `true` - 替换了已有帐号
/// - `false` - 追加了新帐号
pub fn upsert(accounts: &mut Vec<BaiduAccount>, account: BaiduAccount) -> bool {
    match accounts.iter_mut().find(|existing| existing.uid == account.uid) {
        Some(existing) => {
            *existing = account;
            true
        }
        None => {
            accounts.push(account);
            false
        }
    }
}

/// 删除该 UID 的所有帐号
///
/// 返回被删除的第一个帐号
pub fn remove_by_uid(accounts: &mut Vec<BaiduAccount>, uid: u64) -> Result<BaiduAccount> {
    let first = accounts
        .iter()
        .position(|account| account.uid == uid)
        .ok_or(ConfigError::AccountNotFound { uid })?;

    let removed = accounts.remove(first);
    accounts.retain(|account| account.uid != uid);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<BaiduAccount> {
        vec![
            BaiduAccount::new(1, "first", "a"),
            BaiduAccount::new(2, "second", "b"),
            BaiduAccount::new(1, "duplicate", "c"),
        ]
    }

    #[test]
    fn test_find_first_match_wins() {
        let list = accounts();
        assert_eq!(find_by_uid(&list, 1).unwrap().name, "first");
        assert_eq!(find_by_uid(&list, 2).unwrap().name, "second");
        assert!(find_by_uid(&list, 0).is_none());
    }

    #[test]
    fn test_upsert() {
        let mut list = accounts();

        assert!(upsert(&mut list, BaiduAccount::new(2, "renamed", "b2")));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].name, "renamed");

        assert!(!upsert(&mut list, BaiduAccount::new(3, "third", "d")));
        assert_eq!(list.len(), 4);
        assert_eq!(list[3].uid, 3);
    }

    #[test]
    fn test_remove_by_uid() {
        let mut list = accounts();

        let removed = remove_by_uid(&mut list, 1).unwrap();
        assert_eq!(removed.name, "first");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].uid, 2);

        let err = remove_by_uid(&mut list, 1).unwrap_err();
        assert!(matches!(err, ConfigError::AccountNotFound { uid: 1 }));
    }
}
