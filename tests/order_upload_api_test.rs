// ==========================================
// OrderUploadApi 集成测试
// ==========================================
// 测试范围: CSV 字节 → 汇入 → 查询/汇总/拣货/清空 的完整链路
// ==========================================


use test_helpers::*;

use shop_order_hub::api::{ApiError, OrderUploadApi};

const CSV_HEADER: &str = "訂單編號,訂購日期,收件人姓名,地址,商品名稱,單價,優惠價,數量,備註";

fn csv_bytes(lines: &[&str]) -> Vec<u8> {
    let mut text = String::from(CSV_HEADER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.into_bytes()
}

fn upload_api(db_path: &str) -> OrderUploadApi {
    let conn = open_shared_connection(db_path).expect("无法打开连接");
    OrderUploadApi::new(conn)
}

#[tokio::test]
async fn test_upload_workbook_csv成功() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let bytes = csv_bytes(&[
        "A001,2024/01/15 10:30:00,王小明,台北市信義區,黑咖啡,100,90,2,",
        "A001,2024/01/15 10:30:00,王小明,台北市信義區,拿鐵,120,110,1,去冰",
        "A002,2024/01/16 09:00:00,李小華,台中市西屯區,黑咖啡,100,90,3,",
    ]);

    let rows = api
        .upload_workbook("orders.csv", &bytes)
        .await
        .expect("汇入失败");
    assert_eq!(rows, 3);

    // 列表最新写入在前
    let records = api.list_records().await.expect("查询失败");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].order_no, "A002");
    assert_eq!(records[2].order_no, "A001");

    // 上传时间已记录
    assert!(api.last_upload_time().await.expect("查询失败").is_some());
}

#[tokio::test]
async fn test_upload_workbook_行错误_整批拒绝() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    // 第二个数据行数量非法
    let bytes = csv_bytes(&[
        "A001,2024/01/15 10:30:00,王小明,台北市,黑咖啡,100,90,2,",
        "A002,2024/01/16 09:00:00,李小華,台中市,拿鐵,120,110,兩杯,",
    ]);

    let err = api
        .upload_workbook("orders.csv", &bytes)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::ImportError(_)),
        "行级错误应映射为汇入错误: {err}"
    );

    // 整批拒绝：无任何落库，也没有上传事件
    assert!(api.list_records().await.expect("查询失败").is_empty());
    assert!(api.last_upload_time().await.expect("查询失败").is_none());
}

#[tokio::test]
async fn test_upload_workbook_不支持的扩展名() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let err = api
        .upload_workbook("orders.pdf", b"%PDF-1.4 junk")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
}

#[tokio::test]
async fn test_upload_workbook_缺表头() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let bytes = b"not,a,real,header\n1,2,3,4\n".to_vec();
    let err = api.upload_workbook("orders.csv", &bytes).await.unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
}

#[tokio::test]
async fn test_list_summaries_按订单汇总() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let bytes = csv_bytes(&[
        "A001,2024/01/15 10:30:00,王小明,台北市,黑咖啡,100,90,2,",
        "A001,2024/01/15 10:30:00,王小明,台北市,拿鐵,120,110,1,",
        "A002,2024/01/16 09:00:00,李小華,台中市,黑咖啡,100,90,3,",
    ]);
    api.upload_workbook("orders.csv", &bytes)
        .await
        .expect("汇入失败");

    let summaries = api.list_summaries().await.expect("汇总失败");
    assert_eq!(summaries.len(), 2);

    // 订购时间降序：A002 在前
    assert_eq!(summaries[0].order_no, "A002");
    assert_eq!(summaries[0].total_qty, 3);
    assert_eq!(summaries[0].total_amount, 270.0);

    assert_eq!(summaries[1].order_no, "A001");
    assert_eq!(summaries[1].total_qty, 3);
    // 90×2 + 110×1
    assert_eq!(summaries[1].total_amount, 290.0);
    assert_eq!(summaries[1].items.len(), 2);
}

#[tokio::test]
async fn test_list_picking_按商品汇总() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let bytes = csv_bytes(&[
        "A001,2024/01/15 10:30:00,王小明,台北市,黑咖啡,100,90,2,",
        "A002,2024/01/16 09:00:00,李小華,台中市,黑咖啡,100,90,3,",
        "A002,2024/01/16 09:00:00,李小華,台中市,拿鐵,120,110,1,",
    ]);
    api.upload_workbook("orders.csv", &bytes)
        .await
        .expect("汇入失败");

    let picking = api.list_picking().await.expect("拣货汇总失败");
    assert_eq!(picking.len(), 2);

    // 数量多的在前
    assert_eq!(picking[0].product_name, "黑咖啡");
    assert_eq!(picking[0].total_qty, 5);
    assert_eq!(
        picking[0].order_nos,
        vec!["A001".to_string(), "A002".to_string()]
    );

    assert_eq!(picking[1].product_name, "拿鐵");
    assert_eq!(picking[1].order_nos, vec!["A002".to_string()]);
}

#[tokio::test]
async fn test_clear_all_后可重新汇入() {
    let (_tmp, db_path) = create_test_db().expect("无法创建测试数据库");
    let api = upload_api(&db_path);

    let bytes = csv_bytes(&["A001,2024/01/15 10:30:00,王小明,台北市,黑咖啡,100,90,2,"]);
    api.upload_workbook("orders.csv", &bytes)
        .await
        .expect("汇入失败");
    assert_eq!(api.list_records().await.expect("查询失败").len(), 1);

    api.clear_all().await.expect("清空失败");
    assert!(api.list_records().await.expect("查询失败").is_empty());
    assert!(api.list_summaries().await.expect("汇总失败").is_empty());

    // 清空不影响上传台账
    assert!(api.last_upload_time().await.expect("查询失败").is_some());

    // 清空后可再次汇入
    let bytes = csv_bytes(&["B001,2024/02/01 08:00:00,陳大文,高雄市,美式,80,75,1,"]);
    let rows = api
        .upload_workbook("orders.csv", &bytes)
        .await
        .expect("汇入失败");
    assert_eq!(rows, 1);
}
