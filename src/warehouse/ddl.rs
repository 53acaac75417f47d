// src/warehouse/ddl.rs
//
// Fixed structure and documentation of the three destination tables. The
// comment strings come from the source's data dictionary and carry the
// provenance and revision caveats downstream users need.

pub const ENA_COLUMNS: &str = "\
    id_subsistema VARCHAR,\n\
    Subsistema VARCHAR,\n\
    Data DATE,\n\
    ena_bruta_regiao_mwmed DOUBLE,\n\
    ena_bruta_regiao_percentualmlt DOUBLE,\n\
    ena_armazenavel_regiao_mwmed DOUBLE,\n\
    ena_armazenavel_regiao_percentualmlt DOUBLE";

pub const ENA_INSERT: &str =
    "INSERT INTO DWTABLE_ENA_staging VALUES (?, ?, CAST(? AS DATE), ?, ?, ?, ?)";

pub const ENA_COMMENTS: &str = r#"
COMMENT ON TABLE DWTABLE_ENA IS 'Dados das grandezas de energia natural afluente (ENA) dos reservatórios com periodicidade diária por Subsistemas. Esses dados podem servir de insumo para estudos energéticos e projeção do custo marginal de operação. Os dados disponibilizados fazem parte de um processo de consistência recorrente e podem ser atualizados após a sua publicação.';
COMMENT ON COLUMN DWTABLE_ENA.id_subsistema IS 'Código do Subsistema - Valores possíveis: NE, N, SE, S';
COMMENT ON COLUMN DWTABLE_ENA.Subsistema IS 'Nome do Subsistema - Valores possíveis: Nordeste, Norte, Sudeste, Sul';
COMMENT ON COLUMN DWTABLE_ENA.Data IS 'Data da medida observada - Valores a partir de 2001, até a data presente (com alguns dias de defasagem de publicação)';
COMMENT ON COLUMN DWTABLE_ENA.ena_bruta_regiao_mwmed IS 'Valor de Energia Natural Afluente bruta por Subsistema na unidade de medida MWmed. Representa a energia produzível pelas usinas hidroelétricas de cada subsistema, calculada pelo produto das vazões naturais aos reservatórios com as produtividades a 65% dos volumes úteis. Apenas valores positivos ou nulos.';
COMMENT ON COLUMN DWTABLE_ENA.ena_bruta_regiao_percentualmlt IS 'Valor de Energia Natural Afluente bruta por Subsistema em percentual da Média de Longo Termo (MLT), computada a partir do histórico desde 1931. Apenas valores positivos ou nulos.';
COMMENT ON COLUMN DWTABLE_ENA.ena_armazenavel_regiao_mwmed IS 'Valor de Energia Natural Afluente armazenável por Subsistema na unidade de medida MWmed. Considera as vazões naturais descontadas das vazões vertidas nos reservatórios. Apenas valores positivos ou nulos.';
COMMENT ON COLUMN DWTABLE_ENA.ena_armazenavel_regiao_percentualmlt IS 'Valor de Energia Natural Afluente armazenável por Subsistema em percentual da Média de Longo Termo (MLT). Apenas valores positivos ou nulos.';
"#;

pub const EARM_COLUMNS: &str = "\
    id_subsistema VARCHAR,\n\
    Subsistema VARCHAR,\n\
    Data DATE,\n\
    ear_max_subsistema DOUBLE,\n\
    ear_verif_subsistema_mwmes DOUBLE,\n\
    ear_verif_subsistema_percentual DOUBLE";

pub const EARM_INSERT: &str =
    "INSERT INTO DWTABLE_EARM_staging VALUES (?, ?, CAST(? AS DATE), ?, ?, ?)";

pub const EARM_COMMENTS: &str = r#"
COMMENT ON TABLE DWTABLE_EARM IS 'Dados das grandezas de energia armazenada (EAR) em periodicidade diária por Subsistemas. A EAR representa a energia associada ao volume de água disponível nos reservatórios que pode ser convertido em geração na própria usina e em todas as usinas à jusante na cascata. Os dados disponibilizados fazem parte de um processo de consistência recorrente e podem ser atualizados após a sua publicação.';
COMMENT ON COLUMN DWTABLE_EARM.id_subsistema IS 'Código do Subsistema - Valores possíveis: NE, N, SE, S';
COMMENT ON COLUMN DWTABLE_EARM.Subsistema IS 'Nome do Subsistema - Valores possíveis: Nordeste, Norte, Sudeste, Sul';
COMMENT ON COLUMN DWTABLE_EARM.Data IS 'Data da medida observada - Valores a partir de 2001, até a data presente (com alguns dias de defasagem de publicação)';
COMMENT ON COLUMN DWTABLE_EARM.ear_max_subsistema IS 'Valor de Energia armazenada máxima nos reservatórios das hidroelétricas por subsistema na unidade de medida MWmês, caso todos os reservatórios estivessem cheios. Apenas valores positivos.';
COMMENT ON COLUMN DWTABLE_EARM.ear_verif_subsistema_mwmes IS 'Valor de Energia Armazenada verificada no dia nos reservatórios das hidroelétricas por subsistema na unidade de medida MWmês. Apenas valores positivos.';
COMMENT ON COLUMN DWTABLE_EARM.ear_verif_subsistema_percentual IS 'Valor de Energia Armazenada verificada no dia por subsistema em percentual do volume útil armazenável (ear_max_subsistema) do próprio subsistema. Apenas valores positivos.';
"#;

pub const CARGA_COLUMNS: &str = "\
    id_subsistema VARCHAR,\n\
    Subsistema VARCHAR,\n\
    Data DATE,\n\
    val_cargaenergiamwmed DOUBLE";

pub const CARGA_INSERT: &str =
    "INSERT INTO DWTABLE_CARGA_staging VALUES (?, ?, CAST(? AS DATE), ?)";

pub const CARGA_COMMENTS: &str = r#"
COMMENT ON TABLE DWTABLE_CARGA IS 'Dados de carga por subsistema em base diária, medida em MWmed. Até fevereiro/2021, os dados representam a carga atendida por usinas despachadas e/ou programadas pelo ONS, com base em dados recebidos pelo Sistema de Supervisão e Controle. Entre março/2021 e abril/2023, soma-se a previsão de geração de usinas não despachadas. A partir de 29/04/2023 passou a ser incorporado o valor estimado da micro e minigeração distribuída (MMGD). Os dados fazem parte de um processo de consistência recorrente e podem ser atualizados após a sua publicação.';
COMMENT ON COLUMN DWTABLE_CARGA.id_subsistema IS 'Código do Subsistema - Valores possíveis: NE, N, SE, S';
COMMENT ON COLUMN DWTABLE_CARGA.Subsistema IS 'Nome do Subsistema - Valores possíveis: Nordeste, Norte, Sudeste, Sul';
COMMENT ON COLUMN DWTABLE_CARGA.Data IS 'Data da medida observada - Valores a partir de 2001, até a data presente (com alguns dias de defasagem de publicação)';
COMMENT ON COLUMN DWTABLE_CARGA.val_cargaenergiamwmed IS 'Valor da demanda de energia elétrica por subsistema, na média diária, em MWmed. Apenas valores positivos.';
"#;
