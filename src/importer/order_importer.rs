// ==========================================
// 网店订单出货系统 - 订单批次汇入器
// ==========================================
// 职责: 整合汇入流程，从文件字节到数据库
// 流程: 解析 → 表头定位 → 逐行解码 → 事务落库
// 约定: 任一数据行出错即整批拒绝，不做部分提交
// ==========================================

use crate::domain::UploadEvent;
use crate::importer::error::ImportResult;
use crate::importer::header_locator::{locate_header, row_has_data};
use crate::importer::header_map::HeaderDictionary;
use crate::importer::row_decoder::decode_row;
use crate::importer::sheet_parser::UniversalSheetParser;
use crate::repository::UploadOrderStore;
use std::time::Instant;
use tracing::{debug, info};

// ==========================================
// OrderBatchImporter - 订单批次汇入器
// ==========================================
pub struct OrderBatchImporter<R>
where
    R: UploadOrderStore,
{
    // 数据访问层
    store: R,

    // 表头同义词表（启动时构建一次，之后只读）
    dictionary: HeaderDictionary,
}

impl<R> OrderBatchImporter<R>
where
    R: UploadOrderStore,
{
    /// 创建新的汇入器实例
    ///
    /// # 参数
    /// - store: 上传订单仓储
    pub fn new(store: R) -> Self {
        Self {
            store,
            dictionary: HeaderDictionary::new(),
        }
    }

    /// 汇入一批表格行
    ///
    /// 定位表头后逐行解码，空白行跳过（行号照常推进）。
    /// 首个解码错误使整批失败，此时不产生任何写入。
    ///
    /// # 返回
    /// - Ok(usize): 落库的明细条数
    /// - Err: 表头缺失、行解码错误或数据库错误
    pub async fn import_rows(&self, rows: &[Vec<String>]) -> ImportResult<usize> {
        let start_time = Instant::now();
        let event = UploadEvent::now();
        let batch_id = event.batch_id.clone();

        info!(batch_id = %batch_id, total_rows = rows.len(), "开始汇入订单数据");

        let (header_row, header_index) = locate_header(&self.dictionary, rows)?;
        debug!(header_row_number = header_row + 1, "表头定位完成");

        let mut records = Vec::new();
        for (idx, row) in rows.iter().enumerate().skip(header_row + 1) {
            let row_number = idx + 1;
            debug!(row_number = row_number, cells = ?row, "解析数据行");

            if !row_has_data(row) {
                continue;
            }

            let record = decode_row(row, &header_index, row_number)?;
            records.push(record);
        }

        let count = self.store.save_ingestion(records, event).await?;

        info!(
            batch_id = %batch_id,
            rows = count,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "订单数据汇入完成"
        );
        Ok(count)
    }

    /// 从上传的文件字节汇入
    ///
    /// # 参数
    /// - file_name: 原始文件名（按扩展名选择解析器）
    /// - bytes: 文件内容
    pub async fn import_workbook(&self, file_name: &str, bytes: &[u8]) -> ImportResult<usize> {
        info!(file_name = %file_name, size = bytes.len(), "解析上传文件");
        let rows = UniversalSheetParser.parse(file_name, bytes)?;
        self.import_rows(&rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderLineRecord;
    use crate::importer::error::ImportError;
    use crate::repository::{RecordOrder, RepositoryResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 仅供测试的内存存储
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<OrderLineRecord>>,
        events: Mutex<Vec<UploadEvent>>,
    }

    #[async_trait]
    impl UploadOrderStore for MemoryStore {
        async fn save_ingestion(
            &self,
            records: Vec<OrderLineRecord>,
            event: UploadEvent,
        ) -> RepositoryResult<usize> {
            let count = records.len();
            self.records.lock().unwrap().extend(records);
            self.events.lock().unwrap().push(event);
            Ok(count)
        }

        async fn list_records(
            &self,
            _order: RecordOrder,
        ) -> RepositoryResult<Vec<OrderLineRecord>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn clear_all(&self) -> RepositoryResult<()> {
            self.records.lock().unwrap().clear();
            Ok(())
        }

        async fn last_upload_event(&self) -> RepositoryResult<Option<UploadEvent>> {
            Ok(self.events.lock().unwrap().last().cloned())
        }

        async fn count_records(&self) -> RepositoryResult<usize> {
            Ok(self.records.lock().unwrap().len())
        }
    }

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    const HEADERS: &[&str] = &[
        "訂單編號",
        "訂購日期",
        "收件人姓名",
        "地址",
        "商品名稱",
        "單價",
        "優惠價",
        "數量",
        "備註",
    ];

    #[tokio::test]
    async fn test_import_rows_persists_records_and_event() {
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let rows = grid(&[
            HEADERS,
            &["A001", "2024/01/15", "王小明", "台北市", "黑咖啡", "100", "90", "2", ""],
            &["", "", "", "", "", "", "", "", ""],
            &["A002", "2024/01/16", "李小華", "台中市", "拿鐵", "120", "110", "1", "冰"],
        ]);

        let count = importer.import_rows(&rows).await.unwrap();
        assert_eq!(count, 2);

        let stored = importer.store.records.lock().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].order_no, "A001");
        assert_eq!(stored[1].order_no, "A002");

        let events = importer.store.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(!events[0].batch_id.is_empty());
    }

    #[tokio::test]
    async fn test_import_rows_rejects_whole_batch_on_row_error() {
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let rows = grid(&[
            HEADERS,
            &["A001", "2024/01/15", "王小明", "台北市", "黑咖啡", "100", "90", "2", ""],
            // 第 3 行缺地址
            &["A002", "2024/01/16", "李小華", "", "拿鐵", "120", "110", "1", ""],
        ]);

        let err = importer.import_rows(&rows).await.unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingRequiredField { row: 3, ref field } if field == "address"
        ));

        // 整批拒绝：不落任何明细、不记任何事件
        assert!(importer.store.records.lock().unwrap().is_empty());
        assert!(importer.store.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_rows_requires_header() {
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let rows = grid(&[&["这里", "没有", "表头"], &["1", "2", "3"]]);

        let err = importer.import_rows(&rows).await.unwrap_err();
        assert!(matches!(err, ImportError::HeaderNotFound));
    }

    #[tokio::test]
    async fn test_import_rows_header_only_records_event() {
        // 没有数据行也算成功上传，台账照常记一笔
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let rows = grid(&[HEADERS]);

        let count = importer.import_rows(&rows).await.unwrap();
        assert_eq!(count, 0);
        assert_eq!(importer.store.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_workbook_from_csv_bytes() {
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let csv = "\
order_no,ordered_at,receiver_name,address,product_name,unit_price,discount_price,qty,note\n\
A001,2024-01-15 10:30:00,王小明,台北市,黑咖啡,100,90,2,\n";

        let count = importer
            .import_workbook("orders.csv", csv.as_bytes())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_import_workbook_rejects_unknown_extension() {
        let importer = OrderBatchImporter::new(MemoryStore::default());
        let err = importer
            .import_workbook("orders.pdf", b"junk")
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
